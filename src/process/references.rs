//! This module contains functionality for rendering the reference list.

use super::bib::{BibEntry, BuildContext, Field};
use lazy_static::lazy_static;
use regex::Regex;
use slog::{debug, trace};

lazy_static! {
    /// Regex for the word `and` between author names.
    static ref AUTHOR_SEP: Regex = Regex::new(r"\s+and\s+").unwrap();
}

/// Render the reference list for every cited entry.
///
/// Produces a `<table class="references">` with one row per used entry,
/// in ascending citation-number order. Each row carries the
/// `cite-<number>` anchor that the inline citations point at, followed by
/// the entry's formatted description. A build with no citations gets an
/// empty table.
pub fn references(ctx: &BuildContext) -> String {
    debug!(slog_scope::logger(), "Rendering the reference list...");

    let mut used: Vec<&BibEntry> = ctx.library.iter().filter(|entry| entry.used).collect();
    used.sort_by_key(|entry| entry.number);

    let mut output = String::from("<table class=\"references\">");
    for entry in &used {
        output.push_str(&render_row(entry));
    }
    output.push_str("</table>");

    debug!(
        slog_scope::logger(),
        "Reference list rendered ({} entries)",
        used.len()
    );
    output
}

/// Render one reference row.
///
/// The description concatenates whichever contract fields the entry has,
/// in fixed order. Every present field ends with a `, ` separator except
/// the year, which closes the row with a period. Absent fields contribute
/// nothing, so a sparse entry still comes out clean.
fn render_row(entry: &BibEntry) -> String {
    trace!(
        slog_scope::logger(),
        "Rendering reference {:?}...",
        entry.citation_key
    );

    // Every used entry has a number by the time rendering happens.
    let number = entry.number.unwrap();

    let mut row = format!(
        "<tr><td><span class=\"citation-number\" id=\"cite-{}\">{}</span></td><td>",
        number, number
    );

    if let Some(author) = entry.tag(Field::Author) {
        row.push_str(&format_authors(author));
        row.push_str(", ");
    }
    if let Some(title) = entry.tag(Field::Title) {
        match entry.tag(Field::Url) {
            Some(url) => row.push_str(&format!("<a href=\"{}\">{}</a>, ", url, title)),
            None => {
                row.push_str(title);
                row.push_str(", ");
            }
        }
    }
    if let Some(book_title) = entry.tag(Field::BookTitle) {
        match entry.tag(Field::BookUrl) {
            Some(book_url) => {
                row.push_str(&format!("<a href=\"{}\">{}</a>, ", book_url, book_title))
            }
            None => row.push_str(&format!("<i>{}</i>, ", book_title)),
        }
    }
    if let Some(publisher) = entry.tag(Field::Publisher) {
        row.push_str(&format!("<i>{}</i>, ", publisher));
    }
    if let Some(year) = entry.tag(Field::Year) {
        row.push_str(year);
        row.push('.');
    }

    row.push_str("</td></tr>");
    row
}

/// Format an author list for the reference list.
///
/// Author lists of more than three names are cut down to the first name
/// plus an emphasized "et al." marker. Shorter lists are left exactly as
/// written, `and` separators included.
fn format_authors(authors: &str) -> String {
    let names: Vec<&str> = AUTHOR_SEP.split(authors).collect();

    if names.len() > 3 {
        format!("{} <i>et al.</i>", names[0].trim())
    } else {
        authors.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::cite::cite;

    #[test]
    /// No citations means an empty table, not an error.
    fn empty() {
        let ctx = BuildContext::new("@article{unused, title = {Never Cited}}").unwrap();
        assert_eq!(references(&ctx), "<table class=\"references\"></table>");
    }

    #[test]
    /// Rows come out in citation-number order, not file order.
    fn row_order() {
        let bib = r#"
            @article{a, title = {Entry A}, year = {2001}}
            @article{b, title = {Entry B}, year = {2002}}
            @article{c, title = {Entry C}, year = {2003}}
        "#;
        let mut ctx = BuildContext::new(bib).unwrap();
        cite(&mut ctx, "c");
        cite(&mut ctx, "a");
        cite(&mut ctx, "b");
        cite(&mut ctx, "a");

        let output = references(&ctx);
        let a = output.find("Entry A").unwrap();
        let b = output.find("Entry B").unwrap();
        let c = output.find("Entry C").unwrap();
        assert!(c < a);
        assert!(a < b);
        assert!(output.contains("id=\"cite-1\">1</span>"));
        assert!(output.contains("id=\"cite-3\">3</span>"));
    }

    #[test]
    /// A title-and-year entry renders with no stray separators.
    fn title_and_year_only() {
        let mut ctx =
            BuildContext::new("@misc{t, title = {Sparse Title}, year = {2020}}").unwrap();
        cite(&mut ctx, "t");
        assert_eq!(
            references(&ctx),
            "<table class=\"references\"><tr><td><span class=\"citation-number\" id=\"cite-1\">1</span></td><td>Sparse Title, 2020.</td></tr></table>"
        );
    }

    #[test]
    /// A title with a URL becomes a hyperlink.
    fn title_with_url() {
        let bib = r#"@misc{u,
            title = {Linked Title},
            url = {https://example.com/paper},
            year = {2019}
        }"#;
        let mut ctx = BuildContext::new(bib).unwrap();
        cite(&mut ctx, "u");
        assert!(references(&ctx)
            .contains("<a href=\"https://example.com/paper\">Linked Title</a>, 2019."));
    }

    #[test]
    /// A book title is emphasized, unless a book URL turns it into a
    /// hyperlink.
    fn book_title_forms() {
        let bib = r#"
            @inproceedings{plain, booktitle = {Proc. of Things}, year = {2018}}
            @inproceedings{linked,
                booktitle = {Proc. of Stuff},
                bookurl = {https://example.com/proc},
                year = {2018}
            }
        "#;
        let mut ctx = BuildContext::new(bib).unwrap();
        cite(&mut ctx, "plain");
        cite(&mut ctx, "linked");

        let output = references(&ctx);
        assert!(output.contains("<i>Proc. of Things</i>, 2018."));
        assert!(output.contains("<a href=\"https://example.com/proc\">Proc. of Stuff</a>, 2018."));
    }

    #[test]
    fn publisher_emphasized() {
        let bib = "@book{p, title = {A Book}, publisher = {Nice Press}, year = {2017}}";
        let mut ctx = BuildContext::new(bib).unwrap();
        cite(&mut ctx, "p");
        assert!(references(&ctx).contains("A Book, <i>Nice Press</i>, 2017."));
    }

    #[test]
    /// An entry with every contract field renders them in the fixed
    /// order.
    fn all_fields() {
        let bib = r#"@inproceedings{full,
            author = {J. Doe},
            title = {Full Paper},
            url = {https://example.com/full},
            booktitle = {Proc. of Everything},
            bookurl = {https://example.com/everything},
            publisher = {Omni Press},
            year = {2021}
        }"#;
        let mut ctx = BuildContext::new(bib).unwrap();
        cite(&mut ctx, "full");
        assert!(references(&ctx).contains(
            "J. Doe, <a href=\"https://example.com/full\">Full Paper</a>, \
             <a href=\"https://example.com/everything\">Proc. of Everything</a>, \
             <i>Omni Press</i>, 2021."
        ));
    }

    mod test_format_authors {
        use super::*;

        #[test]
        /// Two authors stay verbatim, `and` included.
        fn two_authors() {
            assert_eq!(format_authors("A. Author and B. Author"), "A. Author and B. Author");
        }

        #[test]
        /// Three authors is still under the cutoff.
        fn three_authors() {
            assert_eq!(format_authors("A and B and C"), "A and B and C");
        }

        #[test]
        /// Four or more authors truncate to the first plus "et al."
        fn four_authors() {
            assert_eq!(format_authors("A and B and C and D"), "A <i>et al.</i>");
        }

        #[test]
        fn single_author() {
            assert_eq!(format_authors("Solo Author"), "Solo Author");
        }

        #[test]
        /// Names containing "and" as a substring are not split.
        fn substring_not_split() {
            assert_eq!(
                format_authors("Alexandra Sanderson and Rolando Brand"),
                "Alexandra Sanderson and Rolando Brand"
            );
        }
    }
}
