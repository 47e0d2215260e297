//! CLI output formatting for all pipeline stages.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ## Scan
//!
//! ```text
//! Pages
//!     001 about.php → about.html
//!     002 index.php → index.html
//!
//! Includes
//!     1_head.php
//!     2_nav.php
//!
//! Assets
//!     css/
//!     uswds/ (missing)
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Build
//!
//! One line per generated file, one per unknown-include warning, one per
//! copied asset directory, and a final summary:
//!
//! ```text
//! Warning: unknown include "utility-sidebar.php" in contact.php
//! Created: about.html
//! Created: contact.html
//! Created: index.html
//! Copied: css/ (2 files)
//!
//! Done! 3 pages generated in dist/
//! ```

use crate::generate::{GeneratedPage, Report};
use crate::scan::Manifest;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

// ============================================================================
// Scan output
// ============================================================================

/// Format scan stage output showing the discovered site inventory.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    for (i, page) in manifest.pages.iter().enumerate() {
        lines.push(format!(
            "    {} {} \u{2192} {}",
            format_index(i + 1),
            page.file_name,
            page.output_name
        ));
    }

    lines.push(String::new());
    lines.push("Includes".to_string());
    for name in &manifest.includes {
        lines.push(format!("    {}", name));
    }

    lines.push(String::new());
    lines.push("Assets".to_string());
    for asset in &manifest.assets {
        if asset.present {
            lines.push(format!("    {}/", asset.name));
        } else {
            lines.push(format!("    {}/ (missing)", asset.name));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    } else {
        lines.push("    (stock defaults)".to_string());
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Warning lines for one page's unknown include references.
fn warning_lines(page: &GeneratedPage) -> Vec<String> {
    page.unknown_includes
        .iter()
        .map(|include| format!("Warning: unknown include \"{}\" in {}", include, page.source))
        .collect()
}

/// Format build stage output: per-page warnings and `Created:` lines in
/// build order, `Copied:` lines for mirrored asset directories, and the
/// final summary.
pub fn format_build_output(report: &Report, output_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for page in &report.pages {
        lines.extend(warning_lines(page));
        lines.push(format!("Created: {}", page.output));
    }

    for dir in &report.assets {
        lines.push(format!("Copied: {}/ ({} files)", dir.name, dir.files));
    }

    lines.push(String::new());
    lines.push(format!(
        "Done! {} pages generated in {}",
        report.pages.len(),
        output_root.display()
    ));

    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &Report, output_root: &Path) {
    for line in format_build_output(report, output_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format check (dry run) output: warnings only, then the checked count.
pub fn format_check_output(report: &Report) -> Vec<String> {
    let mut lines = Vec::new();

    for page in &report.pages {
        lines.extend(warning_lines(page));
    }

    lines.push(format!("Checked {} pages", report.pages.len()));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(report: &Report) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
