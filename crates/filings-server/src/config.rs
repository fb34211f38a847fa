//! Environment configuration.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use filings::EdgarClient;
use std::env;
use std::time::Duration;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Identifying User-Agent sent to the SEC
    pub user_agent: String,
    /// Listen port
    pub port: u16,
    /// Minimum spacing between SEC requests
    pub rate_limit: Duration,
    /// Per-request timeout against SEC hosts
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let user_agent = lookup("SEC_USER_AGENT")
            .filter(|v| !v.trim().is_empty())
            .context("SEC_USER_AGENT must be set")?;

        Ok(Self {
            user_agent,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            rate_limit: Duration::from_millis(
                lookup("EDGAR_RATE_LIMIT_MS")
                    .unwrap_or_else(|| "100".to_string())
                    .parse()
                    .context("EDGAR_RATE_LIMIT_MS must be a number of milliseconds")?,
            ),
            http_timeout: Duration::from_secs(
                lookup("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse()
                    .context("HTTP_TIMEOUT_SECS must be a number of seconds")?,
            ),
        })
    }

    /// Build the SEC client described by this configuration.
    pub fn edgar_client(&self) -> Result<EdgarClient> {
        let http = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.http_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(EdgarClient::with_client(http, &self.user_agent).with_rate_limit(self.rate_limit))
    }
}
