use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use feed_core::{CompiledFeed, FeedCompiler, FeedSnapshot, Refresher};
use feed_ingest::CsvRowSource;
use feed_report::{ParsedFeed, read_feed, write_feed_file};

use crate::cli::{CompileArgs, InspectArgs, WatchArgs};
use crate::config::{DEFAULT_OUTPUT, FeedConfig};

type HookError = Box<dyn Error + Send + Sync>;

/// Result of `compile`: the feed and where it went, if anywhere.
pub struct CompileRun {
    pub feed: CompiledFeed,
    pub written: Option<PathBuf>,
}

/// Compile once and write the feed to the output file, or stdout when none is set.
pub fn run_compile(args: &CompileArgs, config: FeedConfig) -> Result<CompileRun> {
    let config = config.with_overrides(&args.source);
    let source = csv_source(&config)?;
    let compiler = FeedCompiler::new(config.feed_options());
    let feed = compiler.compile(&source).context("compile feed")?;

    if args.dry_run {
        return Ok(CompileRun {
            feed,
            written: None,
        });
    }
    match &config.output.path {
        Some(path) => {
            write_feed_file(path, &feed.xml)?;
            info!(path = %path.display(), bytes = feed.xml.len(), "feed written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(feed.as_bytes()).context("write feed to stdout")?;
            stdout.flush().context("flush stdout")?;
        }
    }
    Ok(CompileRun {
        feed,
        written: config.output.path,
    })
}

/// Refresh forever, rewriting the output file after every successful cycle.
pub fn run_watch(args: &WatchArgs, config: FeedConfig) -> Result<()> {
    let mut config = config.with_overrides(&args.source);
    if let Some(secs) = args.interval_secs {
        config.refresh.interval_secs = secs;
    }
    let output = config
        .output
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let interval = Duration::from_secs(config.refresh.interval_secs.max(1));
    let source = Arc::new(csv_source(&config)?);

    let hook_path = output.clone();
    let refresher = Refresher::new(
        FeedCompiler::new(config.feed_options()),
        source,
        Arc::new(FeedSnapshot::new()),
    )
    .with_publish_hook(Box::new(move |feed: &CompiledFeed| -> Result<(), HookError> {
        write_feed_file(&hook_path, &feed.xml)?;
        info!(path = %hook_path.display(), "feed written");
        Ok(())
    }));

    info!(
        output = %output.display(),
        interval_secs = interval.as_secs(),
        "watching catalog"
    );
    // Nothing sends on this channel; the loop ends with the process.
    let (_shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(0);
    refresher.run(interval, &shutdown_rx);
    Ok(())
}

/// Read a feed file back for display.
pub fn run_inspect(args: &InspectArgs) -> Result<ParsedFeed> {
    let text = fs::read_to_string(&args.feed)
        .with_context(|| format!("read {}", args.feed.display()))?;
    read_feed(&text).with_context(|| format!("parse {}", args.feed.display()))
}

pub fn print_json(feed: &ParsedFeed) -> Result<()> {
    let json = serde_json::to_string_pretty(feed).context("encode feed as JSON")?;
    println!("{json}");
    Ok(())
}

fn csv_source(config: &FeedConfig) -> Result<CsvRowSource> {
    let primary = config.source.primary.clone().ok_or_else(|| {
        anyhow!("no primary sheet configured; pass --primary or set [source] primary")
    })?;
    Ok(CsvRowSource::new(primary, config.source.secondary.clone()))
}
