//! Shared test utilities for the flatsite test suite.
//!
//! Provides a standard source-tree fixture and lookup helpers that panic
//! with a clear message on miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_site();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let page = find_page(&manifest, "about.php");
//! assert_eq!(page.output_name, "about.html");
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::Page;

// =========================================================================
// Fixture setup
// =========================================================================

/// Build a small but complete source tree in a temp directory.
///
/// Layout:
///
/// ```text
/// config.toml          # three fragments, stock assets list
/// 0_config.php         # excluded via [pages] exclude
/// 1_head.php           # fragments
/// 2_nav.php
/// 9_footer.php
/// index.php            # page: all three fragments + local/external links
/// about.php            # page: nav fragment + link back to index
/// contact.php          # page: references unknown 'utility-sidebar.php'
/// css/site.css         # asset
/// images/logo.png      # asset with a nested subdirectory
/// images/icons/arrow.svg
/// ```
///
/// The `uswds` asset directory is configured but intentionally not created,
/// so tests can cover the skip-missing-directory path. Tests get an isolated
/// copy they can mutate without affecting other tests.
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        &root.join("config.toml"),
        r#"
[includes]
files = ["1_head.php", "2_nav.php", "9_footer.php"]
"#,
    );

    write(&root.join("0_config.php"), "<?php $base_url = '/'; ?>\n");
    write(
        &root.join("1_head.php"),
        "<head>\n  <title>Example Site</title>\n</head>\n",
    );
    write(&root.join("2_nav.php"), "<nav>Home</nav>");
    write(&root.join("9_footer.php"), "<footer>Example Agency</footer>\n");

    write(
        &root.join("index.php"),
        concat!(
            "<html>\n",
            "<?php require_once '1_head.php'; ?>\n",
            "<body>\n",
            "<?php require_once '2_nav.php'; ?>\n",
            "<a href=\"about.php\">About</a>\n",
            "<a href=\"https://example.com/external.php\">External</a>\n",
            "<?php require_once '9_footer.php'; ?>\n",
            "</body>\n",
            "</html>\n",
        ),
    );
    write(
        &root.join("about.php"),
        concat!(
            "<html>\n",
            "<body>\n",
            "<?php include '2_nav.php'; ?>\n",
            "<a href=\"index.php\">Back</a>\n",
            "</body>\n",
            "</html>\n",
        ),
    );
    write(
        &root.join("contact.php"),
        concat!(
            "<html>\n",
            "<body>\n",
            "<?php include 'utility-sidebar.php'; ?>\n",
            "<p>Write to us.</p>\n",
            "</body>\n",
            "</html>\n",
        ),
    );

    write(&root.join("css/site.css"), "body { margin: 0; }\n");
    write(&root.join("images/logo.png"), "fake png bytes");
    write(&root.join("images/icons/arrow.svg"), "<svg/>");

    tmp
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// Find a page by source file name. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, file_name: &str) -> &'a Page {
    manifest
        .pages
        .iter()
        .find(|p| p.file_name == file_name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = manifest.pages.iter().map(|p| p.file_name.as_str()).collect();
            panic!("page '{file_name}' not found. Available: {names:?}")
        })
}

/// All page output names in manifest order.
pub fn output_names(manifest: &Manifest) -> Vec<&str> {
    manifest
        .pages
        .iter()
        .map(|p| p.output_name.as_str())
        .collect()
}
