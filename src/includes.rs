//! Include fragment loading.
//!
//! Reads the configured fragment files into an in-memory mapping before any
//! page is flattened. The mapping is built once and read-only afterwards.
//! A missing or unreadable fragment is a configuration error and aborts the
//! run; pages are never flattened against a partial mapping.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Mapping from fragment file name to its full text content.
pub type IncludeMap = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum IncludeError {
    #[error("cannot read include fragment '{name}': {source}")]
    Unreadable {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Load every configured fragment from the source root.
///
/// Fragment names are used verbatim as mapping keys: they are the same
/// strings pages reference in their include directives.
pub fn load_includes(source_root: &Path, names: &[String]) -> Result<IncludeMap, IncludeError> {
    let mut map = IncludeMap::new();
    for name in names {
        let content =
            fs::read_to_string(source_root.join(name)).map_err(|source| IncludeError::Unreadable {
                name: name.clone(),
                source,
            })?;
        map.insert(name.clone(), content);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_all_fragments() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("1_head.php"), "<head></head>").unwrap();
        fs::write(tmp.path().join("2_nav.php"), "<nav>Home</nav>").unwrap();

        let names = vec!["1_head.php".to_string(), "2_nav.php".to_string()];
        let map = load_includes(tmp.path(), &names).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("1_head.php").unwrap(), "<head></head>");
        assert_eq!(map.get("2_nav.php").unwrap(), "<nav>Home</nav>");
    }

    #[test]
    fn content_preserved_byte_for_byte() {
        let tmp = TempDir::new().unwrap();
        let content = "  <nav>\n\tHome\n  </nav>\n\n";
        fs::write(tmp.path().join("nav.php"), content).unwrap();

        let map = load_includes(tmp.path(), &["nav.php".to_string()]).unwrap();
        assert_eq!(map.get("nav.php").unwrap(), content);
    }

    #[test]
    fn missing_fragment_is_fatal() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("1_head.php"), "<head></head>").unwrap();

        let names = vec!["1_head.php".to_string(), "missing.php".to_string()];
        let err = load_includes(tmp.path(), &names).unwrap_err();

        assert!(err.to_string().contains("missing.php"));
    }

    #[test]
    fn empty_list_yields_empty_map() {
        let tmp = TempDir::new().unwrap();
        let map = load_includes(tmp.path(), &[]).unwrap();
        assert!(map.is_empty());
    }
}
