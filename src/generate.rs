//! Site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and produces the
//! output tree: loads the include fragments, flattens every page, writes
//! each output file, and mirrors the asset directories.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # One file per source page
//! ├── about.html
//! ├── css/                       # Mirrored asset directories
//! │   └── site.css
//! └── images/
//!     └── logo.png
//! ```
//!
//! Everything runs serially in a fixed order: includes → pages → assets.
//! The returned [`Report`] records what was written, for display by
//! [`crate::output`].

use crate::assets::{self, AssetError, CopiedDir};
use crate::flatten::{FlattenError, Flattener};
use crate::includes::{self, IncludeError};
use crate::scan::Manifest;
use crate::types::UnknownInclude;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Include error: {0}")]
    Include(#[from] IncludeError),
    #[error("Flatten error: {0}")]
    Flatten(#[from] FlattenError),
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// What a build (or dry run) produced.
#[derive(Debug, Serialize)]
pub struct Report {
    pub pages: Vec<GeneratedPage>,
    pub assets: Vec<CopiedDir>,
}

impl Report {
    /// All unknown-include warnings across all pages, in page order.
    pub fn warnings(&self) -> Vec<UnknownInclude> {
        self.pages
            .iter()
            .flat_map(|page| {
                page.unknown_includes.iter().map(|include| UnknownInclude {
                    include: include.clone(),
                    page: page.source.clone(),
                })
            })
            .collect()
    }
}

/// One flattened page.
#[derive(Debug, Serialize)]
pub struct GeneratedPage {
    /// Source file name, e.g. `about.php`.
    pub source: String,
    /// Output file name, e.g. `about.html`.
    pub output: String,
    /// Fragment names referenced but not in the include mapping.
    pub unknown_includes: Vec<String>,
}

/// Run the full generation stage: load includes, flatten every page into
/// `output_root`, then mirror the asset directories.
pub fn generate(
    manifest: &Manifest,
    source_root: &Path,
    output_root: &Path,
) -> Result<Report, GenerateError> {
    let includes = includes::load_includes(source_root, &manifest.config.includes.files)?;
    let flattener = Flattener::new(&manifest.config)?;

    fs::create_dir_all(output_root)?;

    let mut pages = Vec::new();
    for page in &manifest.pages {
        let content = fs::read_to_string(source_root.join(&page.file_name))?;
        let flattened = flattener.flatten(&content, &includes);
        fs::write(output_root.join(&page.output_name), &flattened.text)?;
        pages.push(GeneratedPage {
            source: page.file_name.clone(),
            output: page.output_name.clone(),
            unknown_includes: flattened.unknown_includes,
        });
    }

    let assets = assets::copy_assets(source_root, output_root, &manifest.config.assets.dirs)?;

    Ok(Report { pages, assets })
}

/// Dry run: load includes and flatten every page without writing anything.
///
/// Exercises the same fatal paths as [`generate`] (missing fragments,
/// unreadable pages) and collects the same unknown-include warnings, so
/// `check` catches what a build would.
pub fn check(manifest: &Manifest, source_root: &Path) -> Result<Report, GenerateError> {
    let includes = includes::load_includes(source_root, &manifest.config.includes.files)?;
    let flattener = Flattener::new(&manifest.config)?;

    let mut pages = Vec::new();
    for page in &manifest.pages {
        let content = fs::read_to_string(source_root.join(&page.file_name))?;
        let flattened = flattener.flatten(&content, &includes);
        pages.push(GeneratedPage {
            source: page.file_name.clone(),
            output: page.output_name.clone(),
            unknown_includes: flattened.unknown_includes,
        });
    }

    Ok(Report {
        pages,
        assets: Vec::new(),
    })
}
