//! Error types for extraction operations.
//!
//! This module defines [`FilingsError`] which covers every failure the extraction
//! pipeline can report, from upstream HTTP failures to "nothing was tagged" outcomes.

use thiserror::Error;

/// Errors that can occur while resolving, fetching or parsing SEC filings.
#[derive(Error, Debug)]
pub enum FilingsError {
    /// The ticker or CIK is unknown to the SEC.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An upstream SEC resource answered with a non-success status.
    #[error("Upstream request to {url} failed: HTTP {status}")]
    Upstream {
        /// The requested URL.
        url: String,
        /// The HTTP status code returned.
        status: u16,
    },

    /// Transport-level failure (connection refused, timeout, TLS, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Error decoding an upstream payload (JSON, numbers, dates).
    #[error("Parse error: {0}")]
    Parse(String),

    /// The XBRL tokenizer could not make sense of an instance document.
    #[error("XML error: {0}")]
    Xml(String),

    /// The filer has no annual (10-K) filing in its recent submissions.
    #[error("No 10-K filing found for CIK {0}")]
    NoFilingFound(String),

    /// The filing directory holds no usable XBRL instance document.
    #[error("No XBRL instance document in filing {0}")]
    NoInstanceDocument(String),

    /// The document parsed cleanly but contained no matching facts or contexts.
    ///
    /// This is a valid "not disclosed" outcome rather than a fault.
    #[error("Nothing extracted: {0}")]
    EmptyYield(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

impl FilingsError {
    /// Returns true for outcomes that simply mean "no segment data disclosed".
    #[must_use]
    pub const fn is_not_disclosed(&self) -> bool {
        matches!(
            self,
            Self::NoFilingFound(_) | Self::NoInstanceDocument(_) | Self::EmptyYield(_)
        )
    }

    /// Returns true if the failure originated upstream (status or transport).
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::Network(_))
    }
}

/// Result type alias using [`FilingsError`].
pub type Result<T> = std::result::Result<T, FilingsError>;
