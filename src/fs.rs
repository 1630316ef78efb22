//! Functions for interacting with the file system.

use ansi_term::Color;
use slog::debug;
use std::{fs, path::Path};

/// The packaged stylesheet for the rendered reference list.
const STYLESHEET: &str = include_str!("../assets/style.css");

/// Load a file into a string.
///
/// This function is used to load both the input document and the BibTeX
/// bibliography into strings, which can then be passed to the processor.
pub fn load_file(path: &Path) -> Result<String, String> {
    debug!(
        slog_scope::logger(),
        "Loading file {}...",
        path.to_string_lossy()
    );

    match fs::read_to_string(path) {
        Ok(r) => {
            debug!(
                slog_scope::logger(),
                "File {} loaded.",
                path.to_string_lossy()
            );
            Ok(r)
        }
        Err(e) => {
            let err_msg = format!("error reading the file {}—{}", path.to_string_lossy(), e);
            Err(err_msg)
        }
    }
}

/// Save a string in a file.
///
/// This function saves the processed document to a file. It is used when
/// an output file was given on the command line.
pub fn save_file(path: &Path, output: &str) -> Result<(), String> {
    debug!(slog_scope::logger(), "Saving {}...", path.to_string_lossy());
    eprintln!(
        "{} Saving {}...",
        Color::Green.paint("INFO"),
        Color::Blue.paint(path.to_string_lossy())
    );

    match std::fs::write(path, output) {
        Ok(_) => {
            debug!(
                slog_scope::logger(),
                "File {} saved.",
                path.to_string_lossy()
            );
            Ok(())
        }
        Err(e) => {
            let err_msg = format!("error writing the file {}—{}", path.to_string_lossy(), e);
            Err(err_msg)
        }
    }
}

/// Write the packaged stylesheet into a directory as `style.css`.
///
/// The stylesheet only styles the rendered reference table; skipping it
/// changes nothing about the markup.
pub fn export_stylesheet(dir: &Path) -> Result<(), String> {
    let path = dir.join("style.css");
    eprintln!(
        "{} Writing stylesheet {}",
        Color::Green.paint("INFO"),
        Color::Blue.paint(path.to_string_lossy())
    );

    match fs::write(&path, STYLESHEET) {
        Ok(_) => Ok(()),
        Err(e) => {
            let err_msg = format!(
                "error writing the stylesheet {}—{}",
                path.to_string_lossy(),
                e
            );
            Err(err_msg)
        }
    }
}

/// Create a new project.
///
/// Creates a project directory with a starter document, a starter
/// bibliography at the conventional location, and a `book.json`.
pub fn new_project(name: &str) {
    eprintln!(
        "{} Creating new project {}",
        Color::Green.paint("INFO"),
        Color::Blue.paint(name)
    );

    // The filenames for a new project.
    let root = format!("./{}/", name);
    let md = format!("{}{}.md", root, name);
    let bib = format!("{}literature.bib", root);
    let book = format!("{}book.json", root);

    // The contents of the files.
    let md_contents = r#"# New Project

Cite a source like this: {{ "placeholder2020" | cite }}.

## References

{% references %}{% endreferences %}
"#;

    let bib_contents = r#"@misc{placeholder2020,
    author = {A. Placeholder},
    title = {A Placeholder Source},
    url = {https://example.com/placeholder},
    year = {2020}
}
"#;

    let book_contents = r#"{
    "pluginsConfig": {
        "bibcite": {
            "library": "literature.bib"
        }
    }
}
"#;

    // Try to create the directory and each file
    if let Err(e) = fs::create_dir(root) {
        eprintln!(
            "{} Error creating project directory: {}",
            Color::Red.paint("ERRO"),
            e
        );
    };
    if let Err(e) = fs::write(md, md_contents) {
        eprintln!(
            "{} Error creating starter document: {}",
            Color::Red.paint("ERRO"),
            e
        );
    }
    if let Err(e) = fs::write(bib, bib_contents) {
        eprintln!(
            "{} Error creating starter bibliography: {}",
            Color::Red.paint("ERRO"),
            e
        );
    }
    if let Err(e) = fs::write(book, book_contents) {
        eprintln!(
            "{} Error creating book.json: {}",
            Color::Red.paint("ERRO"),
            e
        );
    }
}
