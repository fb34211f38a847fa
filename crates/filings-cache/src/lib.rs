#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Caching implementations for the SEC ticker directory.
//!
//! This crate provides implementations of the [`TickerCache`] trait from `filings-core`:
//!
//! - [`InMemoryTickerCache`] - Lazily populated once per warm process
//! - [`NoopTickerCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

// Re-export the trait for convenience
pub use filings_core::TickerCache;

// Re-export implementations
pub use memory::InMemoryTickerCache;
pub use noop::NoopTickerCache;
