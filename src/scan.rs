//! Source directory scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Enumerates the source root and produces a
//! structured manifest that the flatten stage consumes.
//!
//! ## Source Layout
//!
//! ```text
//! site/                            # Source root
//! ├── config.toml                  # Site configuration (optional)
//! ├── 0_config.php                 # Excluded via [pages] exclude
//! ├── 1_head.php                   # Include fragment (excluded from pages)
//! ├── 2_nav.php                    # Include fragment
//! ├── 9_footer.php                 # Include fragment
//! ├── index.php                    # Page → index.html
//! ├── about.php                    # Page → about.html
//! ├── css/                         # Asset directory (mirrored)
//! └── images/                      # Asset directory (mirrored)
//! ```
//!
//! Pages live directly in the source root; the scan does not recurse.
//! Subdirectories are either configured asset directories or ignored.
//!
//! ## Output
//!
//! Produces a [`Manifest`] containing:
//! - Pages, sorted by file name for deterministic build order
//! - The configured include fragment names
//! - Asset directories with their presence at the source
//! - Site configuration

use crate::config::{self, SiteConfig};
use crate::types::Page;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub pages: Vec<Page>,
    /// Configured include fragment names (loaded later by the flatten stage).
    pub includes: Vec<String>,
    pub assets: Vec<AssetDir>,
    pub config: SiteConfig,
}

/// A configured asset directory and whether it exists at the source.
///
/// Absent directories are kept in the manifest so the inventory can show
/// them; the copy stage skips them silently.
#[derive(Debug, Serialize)]
pub struct AssetDir {
    pub name: String,
    pub present: bool,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    // Load site config first (uses defaults if config.toml doesn't exist);
    // it carries the exclusion set the page filter needs.
    let config = config::load_config(root)?;

    let pages = enumerate_pages(root, &config)?;

    let assets = config
        .assets
        .dirs
        .iter()
        .map(|name| AssetDir {
            name: name.clone(),
            present: root.join(name).is_dir(),
        })
        .collect();

    Ok(Manifest {
        pages,
        includes: config.includes.files.clone(),
        assets,
        config,
    })
}

/// Enumerate source pages: regular files directly in the root carrying the
/// source extension, minus the exclusion set. Sorted by file name.
fn enumerate_pages(root: &Path, config: &SiteConfig) -> Result<Vec<Page>, ScanError> {
    let excluded = config.excluded_pages();

    let mut file_names: Vec<String> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| {
            Path::new(name)
                .extension()
                .map(|e| e.eq_ignore_ascii_case(&config.source_ext))
                .unwrap_or(false)
        })
        .filter(|name| !excluded.contains(name.as_str()))
        .collect();

    file_names.sort();

    Ok(file_names
        .into_iter()
        .map(|file_name| {
            let output_name = Path::new(&file_name)
                .with_extension(&config.output_ext)
                .to_string_lossy()
                .into_owned();
            Page {
                file_name,
                output_name,
            }
        })
        .collect())
}
