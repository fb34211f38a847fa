//! Cache trait for the SEC ticker directory.
//!
//! This module defines the [`TickerCache`] trait. The directory is populated lazily,
//! at most once per warm process, and reused by every request afterwards.

use async_trait::async_trait;
use std::sync::Arc;

use crate::types::TickerDirectory;

/// Trait for caching the ticker → CIK directory.
///
/// Implementations are injected into the ticker resolver rather than living in a
/// global, so tests can reset or replace them. Concurrent first-time callers may both
/// miss and both populate; populating is idempotent, so no lock is held across the fetch.
#[async_trait]
pub trait TickerCache: Send + Sync + std::fmt::Debug {
    /// Returns the cached directory, or `None` if it has not been populated yet.
    async fn get(&self) -> Option<Arc<TickerDirectory>>;

    /// Stores a freshly fetched directory.
    async fn put(&self, directory: Arc<TickerDirectory>);

    /// Drops the cached directory so the next lookup refetches it.
    async fn clear(&self);
}
