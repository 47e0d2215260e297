//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Configuration is
//! layered: stock defaults are overridden by a user config file in the source
//! root. The config file names everything the pipeline treats as special
//! (the include fragments, extra excluded files, and the asset directories)
//! so the rest of the crate takes these as explicit values instead of
//! hardcoded lists.
//!
//! ## Config File Location
//!
//! Place `config.toml` in the source root:
//!
//! ```text
//! site/
//! ├── config.toml              # Overrides stock defaults
//! ├── 1_head.php               # Include fragment (listed in [includes])
//! ├── 2_nav.php
//! ├── index.php                # Page
//! └── css/                     # Asset directory (listed in [assets])
//! ```
//!
//! The config file itself never becomes a page; it does not carry the
//! source extension.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_ext = "php"        # Extension of template pages
//! output_ext = "html"       # Extension of generated documents
//!
//! [includes]
//! files = ["1_head.php", "2_nav.php", "9_footer.php", "utility-popular-services.php"]
//!
//! [pages]
//! exclude = ["0_config.php"]
//!
//! [assets]
//! dirs = ["css", "images", "uswds"]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only override the asset directories
//! [assets]
//! dirs = ["static"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults that reproduce the stock site layout. User config
/// files need only specify the values they want to override. Unknown keys are
/// rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Extension of source template pages (no leading dot).
    pub source_ext: String,
    /// Extension of generated output documents (no leading dot).
    pub output_ext: String,
    /// Include fragment settings.
    pub includes: IncludesConfig,
    /// Page enumeration settings.
    pub pages: PagesConfig,
    /// Asset mirroring settings.
    pub assets: AssetsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_ext: "php".to_string(),
            output_ext: "html".to_string(),
            includes: IncludesConfig::default(),
            pages: PagesConfig::default(),
            assets: AssetsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    ///
    /// Extensions must be non-empty, written without a leading dot, and
    /// distinct. Equal extensions would turn link rewriting into a self-loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, ext) in [("source_ext", &self.source_ext), ("output_ext", &self.output_ext)] {
            if ext.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "{key} must not start with a dot (got {ext:?})"
                )));
            }
        }
        if self.source_ext == self.output_ext {
            return Err(ConfigError::Validation(
                "source_ext and output_ext must differ".into(),
            ));
        }
        Ok(())
    }

    /// File names that never become pages: the include fragments plus any
    /// extra exclusions from `[pages] exclude`.
    pub fn excluded_pages(&self) -> HashSet<&str> {
        self.includes
            .files
            .iter()
            .chain(self.pages.exclude.iter())
            .map(String::as_str)
            .collect()
    }
}

/// Include fragment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncludesConfig {
    /// Fragment file names, relative to the source root. Each is loaded into
    /// memory before any page is flattened; a missing fragment aborts the run.
    pub files: Vec<String>,
}

impl Default for IncludesConfig {
    fn default() -> Self {
        Self {
            files: vec![
                "1_head.php".to_string(),
                "2_nav.php".to_string(),
                "9_footer.php".to_string(),
                "utility-popular-services.php".to_string(),
            ],
        }
    }
}

/// Page enumeration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    /// Extra file names excluded from page generation, in addition to the
    /// include fragments (which are always excluded).
    pub exclude: Vec<String>,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["0_config.php".to_string()],
        }
    }
}

/// Asset mirroring settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Asset directory names under the source root, mirrored verbatim into
    /// the output root. Directories absent at the source are skipped.
    pub dirs: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dirs: vec![
                "css".to_string(),
                "images".to_string(),
                "uswds".to_string(),
            ],
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r#"# Flatsite Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the source root (next to your pages). It never becomes
# a page itself. Unknown keys will cause an error.

# Extension of source template pages (no leading dot).
source_ext = "php"

# Extension of generated output documents (no leading dot).
output_ext = "html"

# ---------------------------------------------------------------------------
# Include fragments
# ---------------------------------------------------------------------------
[includes]
# Fragment file names, relative to the source root. Pages reference them via
# include directives; each listed file must exist or the build aborts.
# Fragments are always excluded from page generation.
files = ["1_head.php", "2_nav.php", "9_footer.php", "utility-popular-services.php"]

# ---------------------------------------------------------------------------
# Pages
# ---------------------------------------------------------------------------
[pages]
# Extra file names excluded from page generation (the include fragments
# above are excluded automatically).
exclude = ["0_config.php"]

# ---------------------------------------------------------------------------
# Assets
# ---------------------------------------------------------------------------
[assets]
# Directory names under the source root, mirrored verbatim into the output
# root. Directories that don't exist are skipped silently.
dirs = ["css", "images", "uswds"]
"#
}
