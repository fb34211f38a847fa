#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for SEC filing extraction.
//!
//! This crate provides the foundational abstractions shared by the extraction engine:
//!
//! - [`SecFetcher`](fetch::SecFetcher) - Boundary trait for every upstream SEC request
//! - [`TickerCache`](cache::TickerCache) - Process-wide ticker directory cache
//! - [`FilingsError`](error::FilingsError) - Error taxonomy for the whole pipeline

/// Ticker directory cache trait.
pub mod cache;
/// Error types for extraction operations.
pub mod error;
/// Fetcher trait for upstream SEC resources.
pub mod fetch;
/// Core data types (Cik, XbrlContext, SegmentSet, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::TickerCache;
pub use error::{FilingsError, Result};
pub use fetch::SecFetcher;
pub use types::{
    Cik, CompanyReport, ContextPeriod, Dimension, Filing, Financials, MetricValue, RevenueFact,
    Segment, SegmentSet, SegmentType, Ticker, TickerDirectory, TickerEntry, XbrlContext,
};
