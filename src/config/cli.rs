use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

use crate::application::convert::ConversionMode;

/// Command-line arguments for the `latex-snippet` binary.
#[derive(Debug, Parser)]
#[command(
    name = "latex-snippet",
    version,
    about = "Convert LaTeX snippets to HTML with the latex_snippet engine"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "LATEX_SNIPPET_CONFIG_FILE",
        value_name = "PATH"
    )]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Convert a snippet read from a file or stdin.
    Convert(Box<ConvertArgs>),
    /// List the conversion modes and the engine entry point behind each.
    Modes(ModesArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub overrides: ConvertOverrides,

    /// Snippet to convert; stdin when omitted.
    #[arg(long, short = 'i', value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Where to write the result; stdout when omitted.
    #[arg(long, short = 'o', value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ConvertOverrides {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Override the conversion mode.
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<ConversionMode>,

    /// Shorthand for `--mode html-with-solution`.
    #[arg(long, conflicts_with = "mode", action = clap::ArgAction::SetTrue)]
    pub solution: bool,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ModesArgs {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Print the listing as JSON.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}
