//! Catalog feed compiler CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use feed_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use feed_cli::commands::{print_json, run_compile, run_inspect, run_watch};
use feed_cli::config::FeedConfig;
use feed_cli::logging::{LogConfig, LogFormat, init_logging};
use feed_cli::summary::{print_compile_summary, print_feed};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Compile(args) => {
            let config = FeedConfig::load(cli.config.as_deref())?;
            let run = run_compile(&args, config)?;
            print_compile_summary(&run.feed, run.written.as_deref());
        }
        Command::Watch(args) => {
            let config = FeedConfig::load(cli.config.as_deref())?;
            run_watch(&args, config)?;
        }
        Command::Inspect(args) => {
            let feed = run_inspect(&args)?;
            if args.json {
                print_json(&feed)?;
            } else {
                print_feed(&feed);
            }
        }
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.with_timestamps = matches!(cli.command, Command::Watch(_));
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
