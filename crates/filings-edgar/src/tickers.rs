//! Ticker → CIK resolution.

use crate::api::EdgarApi;
use crate::wire::TickerListing;
use filings_core::{Cik, FilingsError, Result, Ticker, TickerCache, TickerDirectory, TickerEntry};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Build a [`TickerDirectory`] from the raw SEC listing.
///
/// Rows are ordered by their numeric key so that the first listing of a CIK is its
/// primary ticker.
pub fn build_directory(listings: HashMap<String, TickerListing>) -> TickerDirectory {
    let mut rows: Vec<(u64, TickerListing)> = listings
        .into_iter()
        .map(|(key, listing)| (key.parse().unwrap_or(u64::MAX), listing))
        .collect();
    rows.sort_by_key(|(row, _)| *row);

    TickerDirectory::from_entries(rows.into_iter().map(|(_, listing)| TickerEntry {
        ticker: Ticker::new(listing.ticker),
        cik: Cik::new(listing.cik_str),
        title: listing.title,
    }))
}

/// Resolves tickers to CIKs through the SEC directory.
///
/// The directory is fetched lazily on first use and kept in the injected cache for the
/// lifetime of the process. Concurrent cold lookups may each fetch; the last writer wins.
#[derive(Debug, Clone)]
pub struct TickerResolver {
    api: EdgarApi,
    cache: Arc<dyn TickerCache>,
}

impl TickerResolver {
    /// Create a resolver backed by the given API and cache.
    pub fn new(api: EdgarApi, cache: Arc<dyn TickerCache>) -> Self {
        Self { api, cache }
    }

    /// Get the ticker directory, fetching it if the cache is cold.
    pub async fn directory(&self) -> Result<Arc<TickerDirectory>> {
        if let Some(directory) = self.cache.get().await {
            return Ok(directory);
        }

        let directory = Arc::new(build_directory(self.api.company_tickers().await?));
        debug!(tickers = directory.len(), "Loaded SEC ticker directory");
        self.cache.put(Arc::clone(&directory)).await;
        Ok(directory)
    }

    /// Resolve a ticker (case-insensitive) to its directory listing.
    ///
    /// # Errors
    /// [`FilingsError::InvalidParameter`] for an empty ticker,
    /// [`FilingsError::NotFound`] when the SEC does not list it.
    #[instrument(skip(self))]
    pub async fn resolve(&self, ticker: &str) -> Result<TickerEntry> {
        let ticker = Ticker::new(ticker);
        if ticker.is_empty() {
            return Err(FilingsError::InvalidParameter("Empty ticker".to_string()));
        }

        let directory = self.directory().await?;
        let entry = directory
            .get(ticker.as_str())
            .cloned()
            .ok_or_else(|| FilingsError::NotFound(format!("Unknown ticker: {ticker}")))?;

        debug!(cik = %entry.cik, "Found CIK for ticker");
        Ok(entry)
    }

    /// Primary ticker listed for a CIK, if any.
    pub async fn ticker_for(&self, cik: Cik) -> Result<Option<Ticker>> {
        Ok(self.directory().await?.ticker_for(cik).cloned())
    }
}
