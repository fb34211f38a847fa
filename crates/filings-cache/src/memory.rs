//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use filings_core::{TickerCache, TickerDirectory};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Cached directory with the time it was populated.
#[derive(Debug, Clone)]
struct CacheEntry {
    directory: Arc<TickerDirectory>,
    cached_at: DateTime<Utc>,
}

/// Process-lifetime ticker directory cache.
///
/// The first lookup in a warm process misses and populates the cache; every later
/// lookup reuses the same `Arc`. [`clear`](TickerCache::clear) resets it.
#[derive(Debug, Default)]
pub struct InMemoryTickerCache {
    entry: RwLock<Option<CacheEntry>>,
}

impl InMemoryTickerCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// When the cached directory was populated, if it has been.
    pub async fn populated_at(&self) -> Option<DateTime<Utc>> {
        self.entry.read().await.as_ref().map(|e| e.cached_at)
    }
}

#[async_trait]
impl TickerCache for InMemoryTickerCache {
    #[instrument(skip(self))]
    async fn get(&self) -> Option<Arc<TickerDirectory>> {
        let cache = self.entry.read().await;
        match cache.as_ref() {
            Some(entry) => {
                debug!("Cache hit for ticker directory");
                Some(Arc::clone(&entry.directory))
            }
            None => {
                debug!("Cache miss for ticker directory");
                None
            }
        }
    }

    #[instrument(skip(self, directory), fields(tickers = directory.len()))]
    async fn put(&self, directory: Arc<TickerDirectory>) {
        let mut cache = self.entry.write().await;
        *cache = Some(CacheEntry {
            directory,
            cached_at: Utc::now(),
        });
        debug!("Cached ticker directory");
    }

    #[instrument(skip(self))]
    async fn clear(&self) {
        self.entry.write().await.take();
        debug!("Cleared ticker directory");
    }
}
