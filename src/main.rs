//! `main.rs` contains the command-line interface for bibcite. It collects
//! the values and options, sets up the logger for debug builds, assembles
//! the configuration, and passes the configuration to the main function.
#[macro_use]
extern crate slog;

use ansi_term::Color;
use bibcite::config::{BibciteCommand, BibciteConfig, Output, ProcessConfig};
use clap::{crate_version, App, Arg, SubCommand};
use slog::{debug, Drain, Level};
use std::{fs::OpenOptions, process, sync::Mutex};

fn main() -> Result<(), String> {
    // Get the command-line arguments and options
    let matches = App::new("bibcite")
        .version(crate_version!())
        .about("A citation preprocessor for HTML book projects")
        .subcommand_negates_reqs(true)
        .arg(
            Arg::with_name("input")
                .value_name("INPUT FILE")
                .help("The document to process")
                .index(1)
                .required(true),
        )
        .arg(
            Arg::with_name("output")
                .value_name("OUTPUT FILE")
                .help("The .md or .html output (blank outputs to terminal)")
                .index(2)
                .required(false),
        )
        .arg(
            Arg::with_name("library")
                .short('l')
                .long("library")
                .value_name("LIBRARY FILE")
                .help("The BibTeX bibliography (defaults to the project's literature.bib)"),
        )
        .arg(
            Arg::with_name("stylesheet")
                .short('s')
                .long("stylesheet")
                .takes_value(false)
                .help("Also write the reference-list stylesheet next to the output"),
        )
        .arg(
            Arg::with_name("force_overwrite")
                .short('W')
                .long("force_overwrite")
                .takes_value(false)
                .help("Required to overwrite the input file with the output"),
        )
        .arg(
            Arg::with_name("debug")
                .short('d')
                .long("debug")
                .takes_value(false)
                .help("Outputs debug log to bibcite-log.json")
                .hidden_short_help(true)
                .hidden_long_help(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short('v')
                .long("verbose")
                .value_name("NUMBER")
                .help("Verbosity level between 0 and 5")
                .hidden_short_help(true)
                .hidden_long_help(true)
                .default_value("1"),
        )
        .subcommand(SubCommand::with_name("css").about("Export the reference-list stylesheet"))
        .subcommand(
            SubCommand::with_name("new")
                .about("Create a new project skeleton")
                .arg(
                    Arg::with_name("name")
                        .value_name("NAME")
                        .help("The name of the new project")
                        .required(true),
                ),
        )
        .get_matches();

    // Setup the logger.
    //
    // If the debug flag is set, the log is output to a file
    // `bibcite-log.json`. Otherwise, all logging goes to the terminal.
    let debug = matches.is_present("debug");
    let min_log_level = match matches.value_of("verbose").unwrap() {
        "0" => Level::Critical,
        "1" => Level::Error,
        "2" => Level::Warning,
        "3" => Level::Info,
        "4" => Level::Debug,
        "5" => Level::Trace,
        _ => Level::Info,
    };

    let term_decorator = slog_term::TermDecorator::new().build();
    let term_drain = slog_term::CompactFormat::new(term_decorator).build().fuse();
    let term_drain = term_drain.filter_level(min_log_level).fuse();

    let _guard: slog_scope::GlobalLoggerGuard = if debug {
        // Setup the file AND terminal loggers
        let log_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open("./bibcite-log.json")
            .unwrap();
        let file_drain = slog_json::Json::new(log_file)
            .set_pretty(true)
            .add_default_keys()
            .build()
            .fuse();
        let file_drain = file_drain.filter_level(Level::Trace).fuse();
        let dual_logger = slog::Logger::root(
            Mutex::new(slog::Duplicate(term_drain, file_drain)).fuse(),
            o!("version" => crate_version!()),
        );
        slog_scope::set_global_logger(dual_logger)
    } else {
        // Setup just the terminal logger
        let term_logger = slog::Logger::root(
            Mutex::new(term_drain).fuse(),
            o!("version" => crate_version!()),
        );
        slog_scope::set_global_logger(term_logger)
    };

    debug!(slog_scope::logger(), "Logger setup");

    // Setup the configuration variables.
    //
    // Subcommands
    let command = match matches.subcommand() {
        Some(("css", _)) => BibciteCommand::ExportStylesheet,
        Some(("new", sub_matches)) => {
            BibciteCommand::NewProject(sub_matches.value_of("name").unwrap())
        }
        _ => BibciteCommand::Main,
    };

    // Subcommands don't need the main configuration.
    if !matches!(command, BibciteCommand::Main) {
        let config = BibciteConfig::new(command, None, None);
        let _ = bibcite::bibcite(config);
        return Ok(());
    }

    // Files
    let input = matches.value_of("input").unwrap();
    let output = matches.value_of("output");
    let library = matches.value_of("library");

    // Processor options
    let stylesheet = matches.is_present("stylesheet");
    let force_overwrite = matches.is_present("force_overwrite");

    // Deal with command-line errors.
    //
    // If the input and output strings are identical and force_overwrite
    // has not been used, return an error and exit.
    if output.is_some() && input == output.unwrap() && !force_overwrite {
        eprintln!("{} The input file ({}) and output file ({}) are the same,\n     but the force overwrite option was not set.\n     If you want to overwrite the input file, use -W/--force_overwrite.", Color::Red.paint("ERRO"), Color::Blue.paint(input), Color::Blue.paint(output.unwrap()));
        process::exit(1);
    }

    // Determine the output
    let output_option = match output {
        Some(f) => {
            if f.ends_with(".md") {
                Output::Markdown
            } else if f.ends_with(".html") || f.ends_with(".htm") {
                Output::Html
            } else {
                eprintln!(
                    "{} The output file must have an .md, .html, or .htm extension. You used {}",
                    Color::Red.paint("ERRO"),
                    Color::Blue.paint(f)
                );
                process::exit(1);
            }
        }
        None => Output::StandardOut,
    };

    // Create the configuration
    let process_config = ProcessConfig::new(input, library, output, stylesheet);
    let config = BibciteConfig::new(command, Some(output_option), Some(process_config));

    // Run the program.
    let _ = bibcite::bibcite(config);

    Ok(())
}
