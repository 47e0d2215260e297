//! Shared types used across pipeline stages.
//!
//! These types flow from scan through flatten to the final report and are
//! serialized when the manifest is dumped as JSON.

use serde::{Deserialize, Serialize};

/// A source page discovered by the scan stage.
///
/// Pages are regular files directly in the source root that carry the source
/// extension and are not excluded (include fragments and extra exclusions
/// never become pages). Each page yields exactly one output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Source file name, e.g. `about.php`.
    pub file_name: String,
    /// Output file name with the extension swapped, e.g. `about.html`.
    pub output_name: String,
}

/// A directive that referenced a fragment missing from the include mapping.
///
/// Non-fatal: the directive text is left unchanged in the output and the
/// reference is reported as a warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnknownInclude {
    /// The fragment name the directive asked for.
    pub include: String,
    /// The page the directive appeared in.
    pub page: String,
}
