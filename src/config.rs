//! The structures and functions for configuration. Must be accessible to main.

/// The overall options.
pub struct BibciteConfig<'a> {
    pub command: BibciteCommand<'a>,
    pub output: Option<Output>,
    pub process_config: Option<ProcessConfig<'a>>,
}

impl BibciteConfig<'_> {
    pub fn new<'a>(
        command: BibciteCommand<'a>,
        output: Option<Output>,
        process_config: Option<ProcessConfig<'a>>,
    ) -> BibciteConfig<'a> {
        BibciteConfig {
            command,
            output,
            process_config,
        }
    }
}

/// The types of subcommands.
pub enum BibciteCommand<'a> {
    Main,
    ExportStylesheet,
    NewProject(&'a str),
}

/// Output options
#[derive(PartialEq, Eq, Debug)]
pub enum Output {
    StandardOut,
    Markdown,
    Html,
}

/// Processor configuration.
pub struct ProcessConfig<'a> {
    pub input: &'a str,
    pub library: Option<&'a str>,
    pub output: Option<&'a str>,
    pub stylesheet: bool,
}

impl ProcessConfig<'_> {
    #[allow(clippy::too_many_arguments)]
    pub fn new<'a>(
        input: &'a str,
        library: Option<&'a str>,
        output: Option<&'a str>,
        stylesheet: bool,
    ) -> ProcessConfig<'a> {
        ProcessConfig {
            input,
            library,
            output,
            stylesheet,
        }
    }
}
