//! This module contains functionality for reading the project's `book.json`.
//!
//! The host book project can point bibcite at a bibliography through its
//! `book.json`. Note, this struct holds only the data that bibcite
//! currently uses. Any other data is discarded.

use crate::fs::load_file;
use serde::Deserialize;
use slog::debug;
use std::path::{Path, PathBuf};

/// The subset of a `book.json` that bibcite reads.
#[derive(Debug, Deserialize)]
pub struct BookConfig {
    #[serde(rename(deserialize = "pluginsConfig"))]
    pub plugins_config: Option<PluginsConfig>,
}

/// The per-plugin configuration block.
#[derive(Debug, Deserialize)]
pub struct PluginsConfig {
    pub bibcite: Option<BibciteSettings>,
}

/// Bibcite's own settings within the plugin configuration.
#[derive(Debug, Deserialize)]
pub struct BibciteSettings {
    pub library: Option<String>,
}

/// Deserialize a `book.json` string.
pub fn build_book_config(json: &str) -> Result<BookConfig, String> {
    match serde_json::from_str(json) {
        Ok(c) => {
            debug!(slog_scope::logger(), "book.json parsed");
            Ok(c)
        }
        Err(e) => {
            let err_msg = format!("error deserializing book.json—{}", e);
            Err(err_msg)
        }
    }
}

/// Resolve the bibliography path for a project root.
///
/// If the root has a `book.json` naming a library, that wins. Otherwise
/// the bibliography lives at the conventional `literature.bib` next to
/// the document. A present-but-malformed `book.json` is an error rather
/// than something to silently skip.
pub fn find_library(root: &Path) -> Result<PathBuf, String> {
    let book_json = root.join("book.json");
    if book_json.exists() {
        let raw = load_file(&book_json)?;
        let config = build_book_config(&raw)?;
        if let Some(library) = config
            .plugins_config
            .and_then(|p| p.bibcite)
            .and_then(|b| b.library)
        {
            debug!(
                slog_scope::logger(),
                "Using the book.json library {:?}", library
            );
            return Ok(root.join(library));
        }
    }

    Ok(root.join("literature.bib"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config() {
        let json = r#"{
            "title": "Some Book",
            "plugins": ["bibcite"],
            "pluginsConfig": {
                "bibcite": {
                    "library": "refs.bib"
                }
            }
        }"#;
        let config = build_book_config(json).unwrap();
        let library = config
            .plugins_config
            .and_then(|p| p.bibcite)
            .and_then(|b| b.library);
        assert_eq!(library.as_deref(), Some("refs.bib"));
    }

    #[test]
    /// A book.json without a bibcite block parses; the library is just
    /// unset.
    fn no_plugin_config() {
        let json = r#"{ "title": "Some Book" }"#;
        let config = build_book_config(json).unwrap();
        assert!(config.plugins_config.is_none());
    }

    #[test]
    fn not_json() {
        let result = build_book_config("this is not json");
        assert!(result
            .unwrap_err()
            .contains("error deserializing book.json"));
    }

    mod test_find_library {
        use super::*;

        #[test]
        /// The tests directory ships a book.json that points at refs.bib.
        fn from_book_json() {
            let library = find_library(Path::new("./tests")).unwrap();
            assert_eq!(library, PathBuf::from("./tests/refs.bib"));
        }

        #[test]
        /// Without a book.json, the conventional location wins.
        fn conventional_default() {
            let library = find_library(Path::new("./src")).unwrap();
            assert_eq!(library, PathBuf::from("./src/literature.bib"));
        }
    }
}
