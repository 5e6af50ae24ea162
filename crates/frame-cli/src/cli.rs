//! CLI argument definitions for `framectl`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "framectl",
    version,
    about = "Run data frame transformation pipelines and format values",
    long_about = "Apply transformation pipelines to data frames and render the result.\n\n\
                  Pipelines are JSON or TOML documents listing stages by transformer id.\n\
                  Frames are JSON arrays of frame DTOs, or of flat rows with --rows."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply a pipeline to a frames file and print the result.
    Run(RunArgs),

    /// List registered transformers.
    Transformers,

    /// Format a single value with a field config.
    Format(FormatArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// JSON file with the input frames.
    #[arg(value_name = "FRAMES")]
    pub frames: PathBuf,

    /// Pipeline document (.json or .toml). Without it frames pass through.
    #[arg(long = "pipeline", value_name = "FILE")]
    pub pipeline: Option<PathBuf>,

    /// Treat the input as an array of flat row objects.
    #[arg(long = "rows")]
    pub rows: bool,

    /// Output format.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,

    /// Print raw values instead of running the display processor.
    #[arg(long = "no-display")]
    pub no_display: bool,

    /// Exit with status 1 when any stage reported a warning.
    #[arg(long = "fail-on-warnings")]
    pub fail_on_warnings: bool,

    #[command(flatten)]
    pub display: DisplayArgs,
}

#[derive(Parser)]
pub struct FormatArgs {
    /// Raw value as JSON (`12.5`, `null`, `"text"`); non-JSON input is a string.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// JSON file with a field config.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Unit id (overrides the config).
    #[arg(long = "unit")]
    pub unit: Option<String>,

    /// Pinned decimals (overrides the config).
    #[arg(long = "decimals", allow_negative_numbers = true)]
    pub decimals: Option<i32>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

#[derive(Parser)]
pub struct DisplayArgs {
    /// Theme used to resolve named colors.
    #[arg(long = "theme", value_enum, default_value = "dark")]
    pub theme: ThemeArg,

    /// Render dates in UTC instead of local time.
    #[arg(long = "utc")]
    pub utc: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
