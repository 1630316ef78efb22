//! The module contains the entry store built from the parsed bibliography.

use super::bibtex::{self, RawEntry};
use phf::phf_map;
use slog::{debug, trace};
use std::collections::HashMap;

/// The fields that the reference list knows how to render.
///
/// This is the whole field contract. Anything else in a bibliography
/// entry is discarded when the store is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Author,
    Title,
    Url,
    BookTitle,
    BookUrl,
    Publisher,
    Year,
}

/// Static map from uppercase BibTeX field names to [`Field`]s.
pub static FIELD_NAMES: phf::Map<&'static str, Field> = phf_map! {
    "AUTHOR" => Field::Author,
    "TITLE" => Field::Title,
    "URL" => Field::Url,
    "BOOKTITLE" => Field::BookTitle,
    "BOOKURL" => Field::BookUrl,
    "PUBLISHER" => Field::Publisher,
    "YEAR" => Field::Year,
};

/// A bibliography entry, plus its citation state for the current build.
///
/// `number` is set if and only if `used` is true. Numbers are handed out
/// by the citation tracker in order of first use and never change after
/// that.
#[derive(Debug)]
pub struct BibEntry {
    pub citation_key: String,
    pub tags: HashMap<Field, String>,
    pub used: bool,
    pub number: Option<u32>,
}

impl BibEntry {
    /// Convenience accessor for a field's value, if present.
    pub fn tag(&self, field: Field) -> Option<&str> {
        self.tags.get(&field).map(String::as_str)
    }
}

pub type Bibliography = Vec<BibEntry>;

/// The shared state for one document build.
///
/// One context is created per build and owns the bibliography along with
/// the used-entry counter. The citation tracker takes it by `&mut`, the
/// reference renderer by `&`, so a build can never race itself.
#[derive(Debug)]
pub struct BuildContext {
    pub library: Bibliography,
    pub cited: u32,
}

impl BuildContext {
    /// Parse a raw bibliography string and set up a fresh context.
    pub fn new(raw: &str) -> Result<BuildContext, String> {
        let raw_entries = bibtex::build_bib_library(raw)?;
        Ok(BuildContext {
            library: build_bibliography(raw_entries),
            cited: 0,
        })
    }
}

/// Build the [`Bibliography`] from the parser's raw records.
///
/// Entries keep their file order. Only fields in [`FIELD_NAMES`] are
/// kept; every entry starts out unused and unnumbered.
pub fn build_bibliography(raw_entries: Vec<RawEntry>) -> Bibliography {
    debug!(slog_scope::logger(), "Building the entry store...");

    let mut library: Bibliography = Vec::with_capacity(raw_entries.len());
    for raw in raw_entries {
        let mut tags = HashMap::new();
        for (name, value) in raw.entry_tags {
            if let Some(&field) = FIELD_NAMES.get(name.as_str()) {
                tags.insert(field, value);
            } else {
                trace!(
                    slog_scope::logger(),
                    "Discarding unused field {:?} on {:?}",
                    name,
                    raw.citation_key
                );
            }
        }
        library.push(BibEntry {
            citation_key: raw.citation_key,
            tags,
            used: false,
            number: None,
        });
    }

    debug!(
        slog_scope::logger(),
        "Entry store built ({} entries)",
        library.len()
    );
    library
}

/// Find an entry by citation key.
///
/// Keys are compared case-insensitively; the store holds them uppercased,
/// so the query is uppercased before comparison.
pub fn lookup<'a>(library: &'a Bibliography, key: &str) -> Option<&'a BibEntry> {
    let key = key.to_uppercase();
    library.iter().find(|entry| entry.citation_key == key)
}

/// Find an entry by citation key, mutably.
pub fn lookup_mut<'a>(library: &'a mut Bibliography, key: &str) -> Option<&'a mut BibEntry> {
    let key = key.to_uppercase();
    library.iter_mut().find(|entry| entry.citation_key == key)
}
