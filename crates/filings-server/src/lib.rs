#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Environment configuration.
pub mod config;
/// HTTP error mapping.
pub mod error;
/// Routes and router assembly.
pub mod routes;

pub use config::Config;
pub use error::ApiError;
pub use routes::{FinancialsParams, build_app};
