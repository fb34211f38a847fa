#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR extraction engine.
//!
//! This crate turns a filer's EDGAR data into structured facts:
//!
//! - CIK (Central Index Key) lookup from ticker symbols
//! - Consolidated metrics from the company facts API, reconciled across renamed concepts
//! - Latest 10-K location and XBRL instance document selection
//! - Segment revenue recovered by joining instance facts to dimensional contexts
//!
//! # Example
//!
//! ```no_run
//! use filings_edgar::{EdgarApi, EdgarClient, extract_financials};
//! use filings_core::Cik;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new("MyApp/1.0 (contact@example.com)")?;
//!     let api = EdgarApi::new(Arc::new(client));
//!
//!     let facts = api.company_facts(Cik::new(320_193)).await?;
//!     let financials = extract_financials(&facts);
//!     println!("Revenue: {:?}", financials.revenue);
//!
//!     Ok(())
//! }
//! ```

/// Typed SEC API over a fetcher.
pub mod api;
/// Geographic vs. business classification.
pub mod classify;
/// Rate-limited HTTP client.
pub mod client;
/// Consolidated metric extraction.
pub mod concepts;
/// Latest 10-K and instance document selection.
pub mod locator;
/// Segment join and aggregation.
pub mod segments;
/// Ticker → CIK resolution.
pub mod tickers;
/// SEC API response types.
pub mod wire;
/// Instance document parsing.
pub mod xbrl;

#[cfg(test)]
mod testing;

pub use api::{EdgarApi, EdgarUrls, fetch_json};
pub use classify::{classify_segment_type, is_geographic};
pub use client::EdgarClient;
pub use concepts::{
    Metric, REVENUE_CONCEPTS, extract_financials, extract_latest_annual, extract_metric,
};
pub use locator::{latest_annual_filing, select_instance_document};
pub use segments::{BUSINESS_SEGMENT_AXIS, aggregate_segments, clean_segment_name};
pub use tickers::{TickerResolver, build_directory};
pub use xbrl::{parse_contexts, parse_revenue_facts};
