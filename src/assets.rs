//! Asset directory mirroring.
//!
//! Recreates each configured asset directory under the output root and
//! copies every regular file, creating intermediate directories as needed.
//! Destination files are overwritten unconditionally. A configured directory
//! missing at the source is skipped without error.

use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One mirrored asset directory.
#[derive(Debug, Clone, Serialize)]
pub struct CopiedDir {
    pub name: String,
    /// Number of regular files copied, across all nesting levels.
    pub files: usize,
}

/// Mirror each named directory from `source_root` into `output_root`.
///
/// Returns one entry per directory actually copied; names whose source
/// directory does not exist are absent from the result.
pub fn copy_assets(
    source_root: &Path,
    output_root: &Path,
    dirs: &[String],
) -> Result<Vec<CopiedDir>, AssetError> {
    let mut copied = Vec::new();
    for name in dirs {
        let src = source_root.join(name);
        if !src.is_dir() {
            continue;
        }
        let files = mirror_dir(&src, &output_root.join(name))?;
        copied.push(CopiedDir {
            name: name.clone(),
            files,
        });
    }
    Ok(copied)
}

/// Recursively copy `src` into `dst`, returning the number of files copied.
///
/// Walkdir yields directories before their contents, so every file's parent
/// exists by the time the file is copied.
fn mirror_dir(src: &Path, dst: &Path) -> Result<usize, AssetError> {
    fs::create_dir_all(dst)?;

    let mut files = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let dest = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            fs::copy(entry.path(), &dest)?;
            files += 1;
        }
    }
    Ok(files)
}
