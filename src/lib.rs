//! Contains the main bibcite function. Determines which parts of bibcite to run.

pub mod book;
pub mod config;
mod fs;
pub mod process;

use ansi_term::Color;
use config::{BibciteCommand, BibciteConfig, Output};
use fs::load_file;
use slog::{debug, error, o};
use std::path::{Path, PathBuf};

/// The main bibcite function.
pub fn bibcite(config: BibciteConfig) -> Result<(), String> {
    // Check subcommands.
    match config.command {
        BibciteCommand::ExportStylesheet => {
            debug!(slog_scope::logger(), "Exporting the stylesheet");
            if let Err(e) = fs::export_stylesheet(Path::new(".")) {
                eprintln!("{} Stylesheet error: {}", Color::Red.paint("ERRO"), e);
                std::process::exit(1);
            }
            return Ok(());
        }
        BibciteCommand::NewProject(name) => {
            debug!(slog_scope::logger(), "Creating new project");
            fs::new_project(name);
            return Ok(());
        }
        BibciteCommand::Main => {}
    }

    eprintln!("{} Starting bibcite...", Color::Green.paint("INFO"));

    // Create paths for the input, bibliography, and output.
    let process_config = config.process_config.as_ref().unwrap();
    let input = Path::new(process_config.input);
    let output = process_config.output.map(Path::new);

    // Load the input document
    let input_text =
        match slog_scope::scope(&slog_scope::logger().new(o!("fn" => "load_file()")), || {
            load_file(input)
        }) {
            Ok(i) => i,
            Err(e) => {
                error!(slog_scope::logger(), "Document load error: {}", e);
                eprintln!("{} Document load error: {}", Color::Red.paint("ERRO"), e);
                std::process::exit(1);
            }
        };

    // Resolve the bibliography path. An explicit --library wins;
    // otherwise the project root (the input's directory) decides.
    let library_path = match process_config.library {
        Some(l) => PathBuf::from(l),
        None => {
            let project_root = match input.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            match slog_scope::scope(
                &slog_scope::logger().new(o!("fn" => "find_library()")),
                || book::find_library(project_root),
            ) {
                Ok(l) => l,
                Err(e) => {
                    error!(slog_scope::logger(), "Project config error: {}", e);
                    eprintln!("{} Project config error: {}", Color::Red.paint("ERRO"), e);
                    std::process::exit(1);
                }
            }
        }
    };

    // Load the bibliography
    let library_text =
        match slog_scope::scope(&slog_scope::logger().new(o!("fn" => "load_file()")), || {
            load_file(&library_path)
        }) {
            Ok(l) => l,
            Err(e) => {
                error!(slog_scope::logger(), "Bibliography load error: {}", e);
                eprintln!(
                    "{} Bibliography load error: {}",
                    Color::Red.paint("ERRO"),
                    e
                );
                std::process::exit(1);
            }
        };

    // Run the processor
    eprintln!("{} Processing...", Color::Green.paint("INFO"));

    let processed = match slog_scope::scope(
        &slog_scope::logger().new(o!("fn" => "process()")),
        || process::process(&input_text, &library_text),
    ) {
        Ok(p) => p,
        Err(e) => {
            error!(slog_scope::logger(), "Processing error: {}", e);
            eprintln!("{} Processing error: {}", Color::Red.paint("ERRO"), e);
            std::process::exit(1);
        }
    };

    // Optionally export the stylesheet next to the output.
    if process_config.stylesheet {
        let style_dir = match output.and_then(Path::parent) {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if let Err(e) = fs::export_stylesheet(style_dir) {
            error!(slog_scope::logger(), "Stylesheet error: {}", e);
            eprintln!("{} Stylesheet error: {}", Color::Red.paint("ERRO"), e);
            std::process::exit(1);
        }
    }

    // Output the processed document.
    if config.output.as_ref().unwrap() == &Output::StandardOut {
        println!("{}", processed);
        return Ok(());
    }

    // This can safely unwrap because an output must have been provided
    // for config.output to be set to Markdown or Html
    let result = fs::save_file(output.unwrap(), &processed);

    eprintln!("{} Done", Color::Green.paint("INFO"));
    result
}
