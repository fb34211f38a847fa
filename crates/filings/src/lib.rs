#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Structured financial facts from SEC EDGAR filings.
//!
//! This crate re-exports the core types, the ticker caches and the EDGAR engine, and
//! provides [`FilingsService`], which composes them into a single report per filer.

// Core types and traits
pub use filings_core::*;

// Cache implementations
pub use filings_cache::{InMemoryTickerCache, NoopTickerCache};

// EDGAR engine
pub use filings_edgar as edgar;
pub use filings_edgar::{EdgarApi, EdgarClient, EdgarUrls, TickerResolver};

mod service;
pub use service::{CompanyQuery, FilingsService};
