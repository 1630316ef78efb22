//! The bibcite document processor.
//!
//! Scans a document for citation markers and references blocks and
//! substitutes the rendered output, sharing one [`bib::BuildContext`]
//! across the whole document.

pub mod bib;
pub mod bibtex;
pub mod cite;
pub mod references;

use bib::BuildContext;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use slog::{debug, o};

lazy_static! {
    /// Regex for inline citation markers, *e.g.*, `{{ "smith99" | cite }}`.
    static ref CITE_MARKER: Regex =
        Regex::new(r#"\{\{\s*["'](?P<key>[^"']+)["']\s*\|\s*cite\s*\}\}"#).unwrap();

    /// Regex for references blocks. The block's own content is opaque and
    /// gets replaced wholesale.
    static ref REFS_BLOCK: Regex =
        Regex::new(r"(?s)\{%\s*references\s*%\}.*?\{%\s*endreferences\s*%\}").unwrap();
}

/// The processor function.
///
/// Citation markers are substituted first, left to right, so numbering
/// follows document reading order. References blocks are substituted
/// after every cite has been seen; a block placed mid-document still
/// lists the whole document's citations.
pub fn process(input: &str, library: &str) -> Result<String, String> {
    debug!(slog_scope::logger(), "Starting processor...");

    // Build the shared context for this document build.
    let mut ctx = match slog_scope::scope(
        &slog_scope::logger().new(o!("fn" => "BuildContext::new()")),
        || BuildContext::new(library),
    ) {
        Ok(c) => c,
        Err(e) => return Err(e),
    };

    // Substitute the inline citations.
    let cited = slog_scope::scope(&slog_scope::logger().new(o!("fn" => "cite()")), || {
        CITE_MARKER
            .replace_all(input, |caps: &Captures| cite::cite(&mut ctx, &caps["key"]))
            .to_string()
    });

    debug!(
        slog_scope::logger(),
        "Inline citations substituted ({} entries cited)",
        ctx.cited
    );

    // Substitute the references blocks.
    let output = slog_scope::scope(&slog_scope::logger().new(o!("fn" => "references()")), || {
        REFS_BLOCK
            .replace_all(&cited, |_: &Captures| references::references(&ctx))
            .to_string()
    });

    debug!(slog_scope::logger(), "Processing completed.");
    Ok(output)
}
