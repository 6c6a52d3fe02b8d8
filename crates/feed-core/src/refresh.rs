//! Periodic recompilation of the published feed.

use std::error::Error;
use std::sync::{Arc, Mutex, TryLockError};
use std::time::Duration;

use crossbeam_channel::{Receiver, select, tick};
use tracing::{debug, error, info};

use feed_ingest::RowSource;
use feed_model::FeedError;

use crate::pipeline::{CompiledFeed, FeedCompiler};
use crate::snapshot::FeedSnapshot;

/// Called after each successful publish, e.g. to persist the feed.
pub type PublishHook =
    Box<dyn Fn(&CompiledFeed) -> Result<(), Box<dyn Error + Send + Sync>> + Send + Sync>;

/// Result of one refresh attempt.
#[derive(Debug)]
pub enum RefreshOutcome {
    Published(Arc<CompiledFeed>),
    /// The cycle failed; the previous snapshot is still current.
    Failed(FeedError),
    /// Another compile was already running.
    Skipped,
}

/// Compiles from a row source and publishes into a snapshot, one cycle at a time.
pub struct Refresher {
    compiler: FeedCompiler,
    source: Arc<dyn RowSource>,
    snapshot: Arc<FeedSnapshot>,
    running: Mutex<()>,
    on_publish: Option<PublishHook>,
}

impl Refresher {
    pub fn new(
        compiler: FeedCompiler,
        source: Arc<dyn RowSource>,
        snapshot: Arc<FeedSnapshot>,
    ) -> Self {
        Self {
            compiler,
            source,
            snapshot,
            running: Mutex::new(()),
            on_publish: None,
        }
    }

    #[must_use]
    pub fn with_publish_hook(mut self, hook: PublishHook) -> Self {
        self.on_publish = Some(hook);
        self
    }

    pub fn snapshot(&self) -> &Arc<FeedSnapshot> {
        &self.snapshot
    }

    /// Run one compile cycle unless one is already in progress.
    pub fn refresh_once(&self) -> RefreshOutcome {
        let _running = match self.running.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                debug!("compile already in progress, trigger ignored");
                return RefreshOutcome::Skipped;
            }
        };

        match self.compiler.compile(self.source.as_ref()) {
            Ok(feed) => {
                let feed = Arc::new(feed);
                self.snapshot.publish(Arc::clone(&feed));
                info!(
                    offers = feed.report.offers,
                    generated_at = %feed.generated_at,
                    "feed published"
                );
                if let Some(hook) = &self.on_publish
                    && let Err(hook_error) = hook(&feed)
                {
                    error!(error = %hook_error, "publish hook failed");
                }
                RefreshOutcome::Published(feed)
            }
            Err(failure) => {
                error!(error = %failure, "compile failed, keeping previous feed");
                RefreshOutcome::Failed(failure)
            }
        }
    }

    /// Refresh now and then on every `interval` until `shutdown` fires or disconnects.
    ///
    /// Ticks that arrive while a compile runs are coalesced into one.
    pub fn run(&self, interval: Duration, shutdown: &Receiver<()>) {
        info!(interval_secs = interval.as_secs(), "refresh loop started");
        self.refresh_once();
        let ticker = tick(interval);
        loop {
            select! {
                recv(ticker) -> _ => {
                    self.refresh_once();
                }
                recv(shutdown) -> _ => break,
            }
        }
        info!("refresh loop stopped");
    }
}
