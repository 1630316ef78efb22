//! This module contains the citation tracker.
//!
//! The tracker turns a citation key into a numbered inline citation. The
//! first time a key is cited, its entry is marked used and given the next
//! sequential number; every later cite of the same key gets the same
//! number back. Order of first cites across keys is what determines the
//! numbering, so the processor calls this in document reading order.

use super::bib::{self, BuildContext};
use ansi_term::Color;
use slog::trace;

/// The inline placeholder for a key with no bibliography entry.
///
/// An unknown key is a problem for the author to notice, not a reason to
/// stop the build, so it renders as visible text instead of failing.
pub const CITATION_NOT_FOUND: &str = "[Citation not found]";

/// Cite an entry by key, returning the inline citation label.
///
/// Returns `<a href="#cite-N">[N]</a>`, where `N` is the entry's
/// citation number and the anchor matches the id that the reference
/// list gives that entry's row. Citing the same key again returns the
/// identical label. An unknown key returns [`CITATION_NOT_FOUND`] and
/// leaves the context untouched.
pub fn cite(ctx: &mut BuildContext, key: &str) -> String {
    trace!(slog_scope::logger(), "Citing {:?}...", key);

    let next = ctx.cited + 1;
    let mut newly_cited = false;

    let number = match bib::lookup_mut(&mut ctx.library, key) {
        Some(entry) => {
            if !entry.used {
                entry.used = true;
                entry.number = Some(next);
                newly_cited = true;
            }
            entry.number.unwrap()
        }
        None => {
            eprintln!(
                "{} No bibliography entry for the citation key \"{}\"",
                Color::Red.paint("ERRO"),
                key
            );
            return CITATION_NOT_FOUND.to_string();
        }
    };

    if newly_cited {
        ctx.cited = next;
        trace!(
            slog_scope::logger(),
            "First cite of {:?}; assigned number {}",
            key,
            number
        );
    }

    format!("<a href=\"#cite-{}\">[{}]</a>", number, number)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIB: &str = r#"
        @article{smith99, author = {J. Smith}, title = {A Paper}, year = {1999}}
        @article{jones05, author = {A. Jones}, title = {Another Paper}, year = {2005}}
        @article{doe10, author = {J. Doe}, title = {A Third Paper}, year = {2010}}
    "#;

    #[test]
    fn label_format() {
        let mut ctx = BuildContext::new(BIB).unwrap();
        assert_eq!(cite(&mut ctx, "smith99"), "<a href=\"#cite-1\">[1]</a>");
    }

    #[test]
    /// Numbers are handed out in first-cite order, contiguously from 1,
    /// regardless of the bibliography's file order.
    fn first_use_ordering() {
        let mut ctx = BuildContext::new(BIB).unwrap();
        assert_eq!(cite(&mut ctx, "doe10"), "<a href=\"#cite-1\">[1]</a>");
        assert_eq!(cite(&mut ctx, "smith99"), "<a href=\"#cite-2\">[2]</a>");
        assert_eq!(cite(&mut ctx, "jones05"), "<a href=\"#cite-3\">[3]</a>");
        assert_eq!(ctx.cited, 3);
    }

    #[test]
    /// Re-citing a key returns the same number and leaves the counter
    /// alone.
    fn idempotent() {
        let mut ctx = BuildContext::new(BIB).unwrap();
        let first = cite(&mut ctx, "smith99");
        let second = cite(&mut ctx, "smith99");
        assert_eq!(first, second);
        assert_eq!(ctx.cited, 1);

        cite(&mut ctx, "jones05");
        let third = cite(&mut ctx, "smith99");
        assert_eq!(first, third);
        assert_eq!(ctx.cited, 2);
    }

    #[test]
    fn case_insensitive() {
        let mut ctx = BuildContext::new(BIB).unwrap();
        let lower = cite(&mut ctx, "smith99");
        let upper = cite(&mut ctx, "SMITH99");
        assert_eq!(lower, upper);
        assert_eq!(ctx.cited, 1);
    }

    #[test]
    /// An unknown key renders the placeholder and mutates nothing.
    fn not_found() {
        let mut ctx = BuildContext::new(BIB).unwrap();
        assert_eq!(cite(&mut ctx, "nope42"), CITATION_NOT_FOUND);
        assert_eq!(ctx.cited, 0);
        assert!(ctx.library.iter().all(|e| !e.used && e.number.is_none()));

        // And it doesn't disturb numbering for real keys afterward.
        assert_eq!(cite(&mut ctx, "smith99"), "<a href=\"#cite-1\">[1]</a>");
    }

    #[test]
    /// The used-counter always equals the number of used entries.
    fn counter_matches_used() {
        let mut ctx = BuildContext::new(BIB).unwrap();
        cite(&mut ctx, "smith99");
        cite(&mut ctx, "nope42");
        cite(&mut ctx, "doe10");
        cite(&mut ctx, "smith99");
        let used = ctx.library.iter().filter(|e| e.used).count() as u32;
        assert_eq!(ctx.cited, used);
        assert_eq!(ctx.cited, 2);
    }
}
