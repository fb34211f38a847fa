//! No-op cache implementation.

use async_trait::async_trait;
use filings_core::{TickerCache, TickerDirectory};
use std::sync::Arc;
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get` always returns `None`, so every lookup refetches the SEC directory.
/// Useful for disabling caching or exercising the cold path in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTickerCache;

impl NoopTickerCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TickerCache for NoopTickerCache {
    async fn get(&self) -> Option<Arc<TickerDirectory>> {
        trace!("NoopTickerCache: get called, returning None");
        None
    }

    async fn put(&self, _directory: Arc<TickerDirectory>) {
        trace!("NoopTickerCache: put called, doing nothing");
    }

    async fn clear(&self) {
        trace!("NoopTickerCache: clear called, doing nothing");
    }
}
