//! The most recently compiled feed, shared with readers.

use std::sync::{Arc, PoisonError, RwLock};

use crate::pipeline::CompiledFeed;

/// Returned to readers before the first compile has been published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("feed is not available yet")]
pub struct NotReady;

/// Holds the current feed. Publishing swaps the whole value; a published
/// feed is never modified.
#[derive(Debug, Default)]
pub struct FeedSnapshot {
    current: RwLock<Option<Arc<CompiledFeed>>>,
}

impl FeedSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current feed.
    pub fn publish(&self, feed: Arc<CompiledFeed>) {
        // The slot only ever holds a complete value, so a poisoned lock is still usable.
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(feed);
    }

    /// Current feed. The lock is released before this returns.
    pub fn current(&self) -> Result<Arc<CompiledFeed>, NotReady> {
        let slot = self.current.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().map(Arc::clone).ok_or(NotReady)
    }

    pub fn is_ready(&self) -> bool {
        self.current().is_ok()
    }
}
