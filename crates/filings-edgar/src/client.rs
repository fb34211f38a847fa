//! Rate-limited HTTP client for SEC hosts.

use async_trait::async_trait;
use filings_core::{FilingsError, Result, SecFetcher};
use reqwest::StatusCode;
use reqwest::header::USER_AGENT;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Default rate limit: 10 requests per second (SEC fair-access policy)
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Rate limiter to ensure we don't exceed SEC's rate limits
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// SEC EDGAR HTTP client.
///
/// Sends the identifying `User-Agent` the SEC requires on every request and spaces
/// requests out per the SEC fair-access policy (max 10 requests/second by default).
#[derive(Debug, Clone)]
pub struct EdgarClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    user_agent: String,
}

impl EdgarClient {
    /// Create a new EDGAR client with the specified user agent.
    ///
    /// The SEC requires identifying user agent headers. Format should be:
    /// "AppName/Version (contact@email.com)"
    ///
    /// # Example
    /// ```
    /// use filings_edgar::EdgarClient;
    ///
    /// let client = EdgarClient::new("MyApp/1.0 (contact@example.com)")?;
    /// # Ok::<(), filings_core::FilingsError>(())
    /// ```
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| FilingsError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, user_agent))
    }

    /// Create a new EDGAR client with a custom HTTP client.
    ///
    /// # Arguments
    /// * `client` - Pre-configured reqwest client
    /// * `user_agent` - User agent string, sent explicitly on every request
    pub fn with_client(client: reqwest::Client, user_agent: &str) -> Self {
        Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(DEFAULT_RATE_LIMIT))),
            user_agent: user_agent.to_string(),
        }
    }

    /// Override the minimum spacing between requests.
    #[must_use]
    pub fn with_rate_limit(mut self, min_interval: Duration) -> Self {
        self.rate_limiter = Arc::new(Mutex::new(RateLimiter::new(min_interval)));
        self
    }

    /// The user agent sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[async_trait]
impl SecFetcher for EdgarClient {
    fn name(&self) -> &str {
        "SEC EDGAR"
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        // Rate limit
        self.rate_limiter.lock().await.wait().await;

        debug!(url, "Fetching from SEC");
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| FilingsError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FilingsError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(FilingsError::Upstream {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FilingsError::Network(format!("Failed to read body of {url}: {e}")))
    }
}
