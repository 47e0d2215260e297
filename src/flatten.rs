//! Page flattening: include substitution and local link rewriting.
//!
//! This is the heart of the pipeline. A page is flattened in one textual
//! pass over its content:
//!
//! 1. Every include directive is replaced with the referenced fragment's
//!    exact content. A directive looks like a PHP include statement:
//!
//!    ```text
//!    <?php require_once '2_nav.php'; ?>
//!    <?php include "9_footer.php"; ?>
//!    ```
//!
//!    All four keywords (`require`, `require_once`, `include`,
//!    `include_once`) are accepted, with single or double quotes and
//!    flexible whitespace. A directive naming a fragment that is not in the
//!    mapping is left untouched and reported back to the caller.
//!
//! 2. Every `href` attribute pointing at a local file with the source
//!    extension is rewritten to the output extension
//!    (`href="about.php"` → `href="about.html"`). Absolute URLs, whether
//!    scheme-prefixed (`https://…`, `mailto:…`) or protocol-relative
//!    (`//…`), are never rewritten.
//!
//! Substitution runs before link rewriting, so links inside substituted
//! fragments are rewritten too. Fragments are not re-scanned for further
//! include directives: nested includes stay unexpanded, matching the
//! one-shot nature of the tool.
//!
//! The flattener does no I/O. Inputs are the page text and the include
//! mapping; outputs are the flattened text and the unknown include names.

use crate::config::SiteConfig;
use crate::includes::IncludeMap;
use regex::{Captures, Regex};
use thiserror::Error;

/// PHP-style include directive: tag open, include-like keyword, quoted
/// fragment name, `;`, tag close. Longer keywords come first in the
/// alternation so `require_once` is not matched as `require` + `_once`.
const DIRECTIVE_PATTERN: &str =
    r#"<\?php\s+(?:require_once|require|include_once|include)\s+['"]([^'"]+)['"]\s*;\s*\?>"#;

#[derive(Error, Debug)]
pub enum FlattenError {
    #[error("invalid link pattern for extension: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result of flattening one page.
#[derive(Debug)]
pub struct Flattened {
    /// The flattened page text.
    pub text: String,
    /// Fragment names referenced by directives but absent from the include
    /// mapping, in order of appearance.
    pub unknown_includes: Vec<String>,
}

/// Compiled flattening pass for one site configuration.
///
/// Compiles both patterns once; the same flattener is reused for every page
/// of a build.
pub struct Flattener {
    directive: Regex,
    local_link: Regex,
    output_ext: String,
}

impl Flattener {
    pub fn new(config: &SiteConfig) -> Result<Self, FlattenError> {
        let directive = Regex::new(DIRECTIVE_PATTERN)?;
        // Match href values ending in the source extension. External URLs
        // also match here and are filtered in the replacement callback.
        let local_link = Regex::new(&format!(
            r#"href="([^"]*?)\.{}""#,
            regex::escape(&config.source_ext)
        ))?;
        Ok(Self {
            directive,
            local_link,
            output_ext: config.output_ext.clone(),
        })
    }

    /// Flatten one page: substitute include directives, then rewrite local
    /// links. Returns the new text and any unknown include references.
    pub fn flatten(&self, content: &str, includes: &IncludeMap) -> Flattened {
        let mut unknown = Vec::new();

        let substituted = self.directive.replace_all(content, |caps: &Captures| {
            let name = &caps[1];
            match includes.get(name) {
                Some(fragment) => fragment.clone(),
                None => {
                    unknown.push(name.to_string());
                    caps[0].to_string()
                }
            }
        });

        let text = self.local_link.replace_all(&substituted, |caps: &Captures| {
            let target = &caps[1];
            if is_absolute_url(target) {
                caps[0].to_string()
            } else {
                format!(r#"href="{target}.{}""#, self.output_ext)
            }
        });

        Flattened {
            text: text.into_owned(),
            unknown_includes: unknown,
        }
    }
}

/// Whether a link target is an absolute URL that must not be rewritten:
/// protocol-relative (`//host/…`) or prefixed with a URI scheme
/// (`https://…`, `mailto:…`).
fn is_absolute_url(target: &str) -> bool {
    if target.starts_with("//") {
        return true;
    }
    // scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
    match target.split_once(':') {
        Some((scheme, _)) if !scheme.is_empty() => {
            scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flattener() -> Flattener {
        Flattener::new(&SiteConfig::default()).unwrap()
    }

    fn nav_includes() -> IncludeMap {
        let mut map = IncludeMap::new();
        map.insert("2_nav.php".to_string(), "<nav>Home</nav>".to_string());
        map
    }

    // =========================================================================
    // Include substitution
    // =========================================================================

    #[test]
    fn directive_replaced_with_exact_fragment_content() {
        let page = r#"<body><?php require_once '2_nav.php'; ?></body>"#;
        let result = flattener().flatten(page, &nav_includes());
        assert_eq!(result.text, "<body><nav>Home</nav></body>");
        assert!(result.unknown_includes.is_empty());
    }

    #[test]
    fn all_four_keywords_accepted() {
        let includes = nav_includes();
        for keyword in ["require", "require_once", "include", "include_once"] {
            let page = format!(r#"<?php {keyword} '2_nav.php'; ?>"#);
            let result = flattener().flatten(&page, &includes);
            assert_eq!(result.text, "<nav>Home</nav>", "keyword: {keyword}");
        }
    }

    #[test]
    fn double_quotes_accepted() {
        let page = r#"<?php include "2_nav.php"; ?>"#;
        let result = flattener().flatten(page, &nav_includes());
        assert_eq!(result.text, "<nav>Home</nav>");
    }

    #[test]
    fn flexible_whitespace_in_directive() {
        let page = "<?php   require_once\t'2_nav.php'  ;  ?>";
        let result = flattener().flatten(page, &nav_includes());
        assert_eq!(result.text, "<nav>Home</nav>");
    }

    #[test]
    fn multiple_directives_all_replaced() {
        let mut includes = nav_includes();
        includes.insert("9_footer.php".to_string(), "<footer/>".to_string());

        let page = "<?php include '2_nav.php'; ?>\nbody\n<?php include '9_footer.php'; ?>";
        let result = flattener().flatten(page, &includes);
        assert_eq!(result.text, "<nav>Home</nav>\nbody\n<footer/>");
    }

    #[test]
    fn repeated_directive_replaced_each_time() {
        let page = "<?php include '2_nav.php'; ?><?php include '2_nav.php'; ?>";
        let result = flattener().flatten(page, &nav_includes());
        assert_eq!(result.text, "<nav>Home</nav><nav>Home</nav>");
    }

    #[test]
    fn unknown_include_preserved_and_reported() {
        let page = r#"<body><?php include 'missing.php'; ?></body>"#;
        let result = flattener().flatten(page, &nav_includes());
        assert_eq!(result.text, page);
        assert_eq!(result.unknown_includes, vec!["missing.php"]);
    }

    #[test]
    fn unknown_includes_reported_in_order() {
        let page = "<?php include 'b.php'; ?><?php include 'a.php'; ?>";
        let result = flattener().flatten(page, &IncludeMap::new());
        assert_eq!(result.unknown_includes, vec!["b.php", "a.php"]);
    }

    #[test]
    fn nested_include_not_expanded() {
        let mut includes = IncludeMap::new();
        includes.insert(
            "outer.php".to_string(),
            "<?php include 'inner.php'; ?>".to_string(),
        );
        includes.insert("inner.php".to_string(), "deep".to_string());

        let page = "<?php include 'outer.php'; ?>";
        let result = flattener().flatten(page, &includes);
        // Single pass: the directive carried in by the fragment survives.
        assert_eq!(result.text, "<?php include 'inner.php'; ?>");
        assert!(result.unknown_includes.is_empty());
    }

    #[test]
    fn text_without_directives_unchanged() {
        let page = "<html><body>plain</body></html>";
        let result = flattener().flatten(page, &nav_includes());
        assert_eq!(result.text, page);
    }

    #[test]
    fn plain_php_block_not_treated_as_directive() {
        let page = "<?php echo 'hello'; ?>";
        let result = flattener().flatten(page, &nav_includes());
        assert_eq!(result.text, page);
        assert!(result.unknown_includes.is_empty());
    }

    // =========================================================================
    // Link rewriting
    // =========================================================================

    #[test]
    fn local_href_extension_rewritten() {
        let page = r#"<a href="about.php">About</a>"#;
        let result = flattener().flatten(page, &IncludeMap::new());
        assert_eq!(result.text, r#"<a href="about.html">About</a>"#);
    }

    #[test]
    fn relative_path_href_rewritten() {
        let page = r#"<a href="docs/guide.php">Guide</a>"#;
        let result = flattener().flatten(page, &IncludeMap::new());
        assert_eq!(result.text, r#"<a href="docs/guide.html">Guide</a>"#);
    }

    #[test]
    fn scheme_prefixed_url_untouched() {
        let page = r#"<a href="https://example.com/x.php">x</a>"#;
        let result = flattener().flatten(page, &IncludeMap::new());
        assert_eq!(result.text, page);
    }

    #[test]
    fn http_url_untouched() {
        let page = r#"<a href="http://example.com/x.php">x</a>"#;
        let result = flattener().flatten(page, &IncludeMap::new());
        assert_eq!(result.text, page);
    }

    #[test]
    fn protocol_relative_url_untouched() {
        let page = r#"<a href="//cdn.example.com/x.php">x</a>"#;
        let result = flattener().flatten(page, &IncludeMap::new());
        assert_eq!(result.text, page);
    }

    #[test]
    fn href_with_other_extension_untouched() {
        let page = r#"<a href="style.css">css</a>"#;
        let result = flattener().flatten(page, &IncludeMap::new());
        assert_eq!(result.text, page);
    }

    #[test]
    fn mixed_links_rewritten_selectively() {
        let page = concat!(
            r#"<a href="index.php">home</a> "#,
            r#"<a href="https://example.com/remote.php">remote</a> "#,
            r#"<a href="contact.php">contact</a>"#,
        );
        let result = flattener().flatten(page, &IncludeMap::new());
        assert_eq!(
            result.text,
            concat!(
                r#"<a href="index.html">home</a> "#,
                r#"<a href="https://example.com/remote.php">remote</a> "#,
                r#"<a href="contact.html">contact</a>"#,
            )
        );
    }

    #[test]
    fn link_inside_substituted_fragment_rewritten() {
        let mut includes = IncludeMap::new();
        includes.insert(
            "2_nav.php".to_string(),
            r#"<a href="index.php">Home</a>"#.to_string(),
        );

        let page = "<?php include '2_nav.php'; ?>";
        let result = flattener().flatten(page, &includes);
        assert_eq!(result.text, r#"<a href="index.html">Home</a>"#);
    }

    #[test]
    fn custom_extensions_respected() {
        let config = SiteConfig {
            source_ext: "tpl".to_string(),
            output_ext: "htm".to_string(),
            ..SiteConfig::default()
        };
        let flattener = Flattener::new(&config).unwrap();

        let page = r#"<a href="about.tpl">a</a> <a href="other.php">b</a>"#;
        let result = flattener.flatten(page, &IncludeMap::new());
        assert_eq!(
            result.text,
            r#"<a href="about.htm">a</a> <a href="other.php">b</a>"#
        );
    }

    // =========================================================================
    // is_absolute_url
    // =========================================================================

    #[test]
    fn absolute_url_detection() {
        assert!(is_absolute_url("https://example.com/page"));
        assert!(is_absolute_url("http://example.com"));
        assert!(is_absolute_url("//cdn.example.com/lib"));
        assert!(is_absolute_url("mailto:someone@example.com"));
        assert!(is_absolute_url("ftp://host/file"));

        assert!(!is_absolute_url("about"));
        assert!(!is_absolute_url("docs/guide"));
        assert!(!is_absolute_url("../up/one"));
        assert!(!is_absolute_url("/rooted/path"));
        assert!(!is_absolute_url(""));
    }
}
