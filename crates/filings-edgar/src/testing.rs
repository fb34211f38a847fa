//! In-memory fetcher for unit tests.

use async_trait::async_trait;
use filings_core::{FilingsError, Result, SecFetcher};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves canned bodies by URL; anything else is a 404.
#[derive(Debug, Default)]
pub(crate) struct StaticFetcher {
    bodies: HashMap<String, String>,
    hits: AtomicUsize,
}

impl StaticFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecFetcher for StaticFetcher {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FilingsError::NotFound(url.to_string()))
    }
}
