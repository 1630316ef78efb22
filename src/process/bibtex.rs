//! The module contains functionality for parsing the BibTeX library.
//!
//! This is the parsing collaborator for the entry store: it turns raw
//! bracketed-entry bibliography text into structured records. Field
//! contents are not validated here; anything structurally well formed is
//! passed along as-is.

use slog::{debug, trace};
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::CharIndices;

/// One raw record from the bibliography file.
///
/// Note, citation keys and field names are normalized to uppercase,
/// matching the conventional treatment of BibTeX keys. Entry types (*e.g.*,
/// `@book`) are parsed but not kept; the reference list does not use them.
#[derive(Debug)]
pub struct RawEntry {
    pub citation_key: String,
    pub entry_tags: HashMap<String, String>,
}

/// Parse a string of BibTeX into a collection of [`RawEntry`]s.
///
/// Text between entries is ignored, as are `@comment`, `@string`, and
/// `@preamble` blocks. Field values can be braced (with nesting), quoted,
/// or bare. A structurally malformed entry returns an error.
pub fn build_bib_library(raw: &str) -> Result<Vec<RawEntry>, String> {
    debug!(slog_scope::logger(), "Starting bibliography parsing...");

    let mut entries = Vec::new();
    let mut chars = raw.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c != '@' {
            continue;
        }

        // The word after the `@` is the entry type.
        let mut entry_type = String::new();
        while let Some(&(_, c)) = chars.peek() {
            if c.is_alphanumeric() {
                entry_type.push(c);
                chars.next();
            } else {
                break;
            }
        }
        let entry_type = entry_type.to_uppercase();

        skip_whitespace(&mut chars);
        match chars.next() {
            Some((_, '{')) => {}
            _ => {
                let err_msg = format!("error parsing the bibliography—expected '{{' after @{}", entry_type);
                return Err(err_msg);
            }
        }

        // Directives have no citation key; skip their bodies entirely.
        if entry_type == "COMMENT" || entry_type == "STRING" || entry_type == "PREAMBLE" {
            skip_braced(&mut chars, &entry_type)?;
            continue;
        }

        entries.push(parse_entry(&mut chars, &entry_type)?);
    }

    debug!(
        slog_scope::logger(),
        "Bibliography parsed ({} entries)",
        entries.len()
    );
    Ok(entries)
}

/// Parse one entry body, starting just after the opening brace.
fn parse_entry(
    chars: &mut Peekable<CharIndices<'_>>,
    entry_type: &str,
) -> Result<RawEntry, String> {
    skip_whitespace(chars);

    // The citation key runs to the first comma (or, for a key-only
    // entry, straight to the closing brace).
    let mut citation_key = String::new();
    let mut closed = false;
    loop {
        match chars.next() {
            Some((_, ',')) => break,
            Some((_, '}')) => {
                closed = true;
                break;
            }
            Some((_, c)) => citation_key.push(c),
            None => {
                let err_msg =
                    format!("error parsing the bibliography—unterminated @{} entry", entry_type);
                return Err(err_msg);
            }
        }
    }
    let citation_key = citation_key.trim().to_uppercase();

    if closed {
        return Ok(RawEntry {
            citation_key,
            entry_tags: HashMap::new(),
        });
    }

    trace!(slog_scope::logger(), "Parsing entry {:?}...", citation_key);

    let mut entry_tags = HashMap::new();

    loop {
        skip_whitespace(chars);
        match chars.peek() {
            Some(&(_, '}')) => {
                chars.next();
                break;
            }
            Some(&(_, ',')) => {
                chars.next();
                continue;
            }
            None => {
                let err_msg = format!(
                    "error parsing the bibliography—unterminated entry body for {}",
                    citation_key
                );
                return Err(err_msg);
            }
            _ => {}
        }

        // Field name runs to the equals sign.
        let mut name = String::new();
        loop {
            match chars.next() {
                Some((_, '=')) => break,
                Some((_, c)) => name.push(c),
                None => {
                    let err_msg = format!(
                        "error parsing the bibliography—field without a value in {}",
                        citation_key
                    );
                    return Err(err_msg);
                }
            }
        }
        let name = name.trim().to_uppercase();

        skip_whitespace(chars);
        let value = parse_value(chars, &citation_key)?;
        entry_tags.insert(name, value);
    }

    Ok(RawEntry {
        citation_key,
        entry_tags,
    })
}

/// Parse one field value: braced, quoted, or bare.
fn parse_value(chars: &mut Peekable<CharIndices<'_>>, key: &str) -> Result<String, String> {
    let mut value = String::new();

    match chars.peek() {
        Some(&(_, '{')) => {
            chars.next();
            let mut depth = 1;
            loop {
                match chars.next() {
                    Some((_, '{')) => {
                        depth += 1;
                        value.push('{');
                    }
                    Some((_, '}')) => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                        value.push('}');
                    }
                    Some((_, c)) => value.push(c),
                    None => {
                        let err_msg = format!(
                            "error parsing the bibliography—unterminated braced value in {}",
                            key
                        );
                        return Err(err_msg);
                    }
                }
            }
        }
        Some(&(_, '"')) => {
            chars.next();
            loop {
                match chars.next() {
                    Some((_, '"')) => break,
                    Some((_, c)) => value.push(c),
                    None => {
                        let err_msg = format!(
                            "error parsing the bibliography—unterminated quoted value in {}",
                            key
                        );
                        return Err(err_msg);
                    }
                }
            }
        }
        _ => {
            // Bare values run to the next comma or the end of the entry.
            while let Some(&(_, c)) = chars.peek() {
                if c == ',' || c == '}' {
                    break;
                }
                value.push(c);
                chars.next();
            }
            value = value.trim().to_string();
        }
    }

    Ok(value)
}

/// Skip a balanced braced block, starting just after the opening brace.
fn skip_braced(chars: &mut Peekable<CharIndices<'_>>, entry_type: &str) -> Result<(), String> {
    let mut depth = 1;
    for (_, c) in chars.by_ref() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
    let err_msg = format!("error parsing the bibliography—unterminated @{} block", entry_type);
    Err(err_msg)
}

fn skip_whitespace(chars: &mut Peekable<CharIndices<'_>>) {
    while let Some(&(_, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else {
            break;
        }
    }
}
