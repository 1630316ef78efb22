//! End-to-end test over the fixture project in this directory.

use bibcite::process::process;
use std::fs;

#[test]
fn fixture_document() {
    let input = fs::read_to_string("tests/test.md").unwrap();
    let library = fs::read_to_string("tests/refs.bib").unwrap();

    let output = process(&input, &library).unwrap();

    // Inline citations: two real sources, one repeat, one broken key.
    assert!(output.contains("A first citation <a href=\"#cite-1\">[1]</a>"));
    assert!(output.contains("a second <a href=\"#cite-2\">[2]</a>"));
    assert!(output.contains("again <a href=\"#cite-1\">[1]</a>"));
    assert!(output.contains("A broken key [Citation not found]"));
    assert!(!output.contains("cite-3"));

    // The reference list holds the two cited sources, in cite order.
    assert!(output.contains(
        "<table class=\"references\"><tr><td><span class=\"citation-number\" \
         id=\"cite-1\">1</span></td><td>Donald E. Knuth, \
         <a href=\"https://doi.org/10.1093/comjnl/27.2.97\">Literate Programming</a>, \
         1984.</td></tr>"
    ));
    assert!(output.contains(
        "id=\"cite-2\">2</span></td><td>Leslie Lamport, \
         LaTeX: A Document Preparation System, <i>Addison-Wesley</i>, 1994.</td></tr>"
    ));

    // The uncited entry stays out of the list.
    assert!(!output.contains("A Heavily Coauthored Paper"));

    // No marker survives processing.
    assert!(!output.contains("{{"));
    assert!(!output.contains("{%"));
}
