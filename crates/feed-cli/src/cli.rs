//! CLI argument definitions for the catalog feed compiler.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "catalog-feed",
    version,
    about = "Compile bilingual catalog sheets into a marketplace YML feed",
    long_about = "Compile a primary-language and a secondary-language catalog sheet export\n\
                  into a YML product feed with main offers and variant offers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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
    /// Compile the feed once.
    Compile(CompileArgs),

    /// Recompile the feed on a fixed interval, rewriting the output file each time.
    Watch(WatchArgs),

    /// Summarize an existing feed file.
    Inspect(InspectArgs),
}

/// Sheet and output locations shared by `compile` and `watch`.
#[derive(Args, Clone, Default)]
pub struct SourceArgs {
    /// Primary-language sheet export (CSV).
    #[arg(long = "primary", value_name = "CSV")]
    pub primary: Option<PathBuf>,

    /// Secondary-language sheet export (CSV).
    #[arg(long = "secondary", value_name = "CSV")]
    pub secondary: Option<PathBuf>,

    /// Feed file to write.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompileArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Build and summarize the feed without writing it anywhere.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Seconds between refreshes (default 14400).
    #[arg(long = "interval-secs", value_name = "SECS")]
    pub interval_secs: Option<u64>,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Feed file to read.
    #[arg(value_name = "FEED")]
    pub feed: PathBuf,

    /// Print the parsed feed as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
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
