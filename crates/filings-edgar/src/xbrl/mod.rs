//! Instance document parsing.
//!
//! Both plain XBRL instances and inline-XBRL HTML documents go through the same
//! [`TagScanner`], so contexts and facts are recognized identically in either syntax.

/// Context extraction.
pub mod contexts;
/// Revenue fact extraction.
pub mod facts;
/// Token-level scanner.
pub mod scanner;

pub use contexts::parse_contexts;
pub use facts::{parse_facts, parse_number, parse_revenue_facts};
pub use scanner::{Element, TagScanner, Token};

use chrono::NaiveDate;

/// Parse an XBRL date, tolerating a trailing time component (`2023-09-30T00:00:00`).
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
