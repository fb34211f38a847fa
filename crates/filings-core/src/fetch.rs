//! Fetcher trait for upstream SEC resources.
//!
//! Every request the engine makes (ticker directory, company facts, submissions,
//! filing directory listings, instance documents) goes through [`SecFetcher`].
//! The production implementation lives in `filings-edgar`; tests substitute
//! in-process fakes.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::Result;

/// Boundary trait for HTTP GETs against SEC hosts.
///
/// Implementations must send an identifying `User-Agent` header, map an HTTP 404 to
/// [`FilingsError::NotFound`](crate::FilingsError::NotFound) and any other non-success
/// status to [`FilingsError::Upstream`](crate::FilingsError::Upstream).
#[async_trait]
pub trait SecFetcher: Send + Sync + Debug {
    /// Returns the name of this fetcher (e.g., "SEC EDGAR").
    fn name(&self) -> &str;

    /// Fetches the body of `url` as text.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}
