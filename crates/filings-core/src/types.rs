//! Core data types for SEC filing extraction.
//!
//! This module defines the structures that flow through the pipeline:
//!
//! - [`Cik`] / [`Ticker`] - Filer identity
//! - [`TickerDirectory`] - Ticker ↔ CIK mapping built from the SEC directory
//! - [`Filing`] - A located annual filing
//! - [`XbrlContext`] - A dimensionally-qualified reporting context
//! - [`RevenueFact`] - A tagged revenue value from an instance document
//! - [`Segment`] / [`SegmentSet`] - Per-segment revenue breakdown
//! - [`MetricValue`] / [`Financials`] - Consolidated metrics
//! - [`CompanyReport`] - The assembled response

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::FilingsError;

/// SEC Central Index Key.
///
/// Stored numerically; displayed and serialized zero-padded to 10 digits as the
/// EDGAR JSON APIs expect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cik(u64);

impl Cik {
    /// Largest CIK representable in 10 digits.
    pub const MAX: u64 = 9_999_999_999;

    /// Creates a CIK from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Returns the CIK zero-padded to 10 digits (e.g. `0000320193`).
    #[must_use]
    pub fn padded(&self) -> String {
        format!("{:010}", self.0)
    }

    /// Returns the CIK without padding (e.g. `320193`), as used in archive paths.
    #[must_use]
    pub fn unpadded(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:010}", self.0)
    }
}

impl FromStr for Cik {
    type Err = FilingsError;

    /// Accepts `320193`, `0000320193` and `CIK0000320193`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("CIK")
            .or_else(|| trimmed.strip_prefix("cik"))
            .unwrap_or(trimmed);

        if digits.is_empty() || digits.len() > 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(FilingsError::InvalidParameter(format!("Invalid CIK: {s}")));
        }

        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|e| FilingsError::InvalidParameter(format!("Invalid CIK {s}: {e}")))
    }
}

impl Serialize for Cik {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A trading ticker.
///
/// Tickers are uppercased and trimmed on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new ticker, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the ticker is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One listing from the SEC ticker directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickerEntry {
    /// Uppercase ticker.
    pub ticker: Ticker,
    /// Filer CIK.
    pub cik: Cik,
    /// Registrant name.
    pub title: String,
}

/// Ticker ↔ CIK directory.
///
/// Built once from the SEC `company_tickers.json` resource. When several tickers share a
/// CIK (share classes), the first listing in SEC order is that CIK's primary ticker.
#[derive(Clone, Debug, Default)]
pub struct TickerDirectory {
    by_ticker: HashMap<String, TickerEntry>,
    by_cik: HashMap<Cik, Ticker>,
}

impl TickerDirectory {
    /// Builds a directory from listings in SEC order.
    pub fn from_entries(entries: impl IntoIterator<Item = TickerEntry>) -> Self {
        let mut directory = Self::default();
        for entry in entries {
            directory
                .by_cik
                .entry(entry.cik)
                .or_insert_with(|| entry.ticker.clone());
            directory
                .by_ticker
                .entry(entry.ticker.as_str().to_string())
                .or_insert(entry);
        }
        directory
    }

    /// Looks up a listing by ticker (case-insensitive).
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<&TickerEntry> {
        self.by_ticker.get(&ticker.trim().to_uppercase())
    }

    /// Returns the primary ticker listed for a CIK.
    #[must_use]
    pub fn ticker_for(&self, cik: Cik) -> Option<&Ticker> {
        self.by_cik.get(&cik)
    }

    /// Number of tickers in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_ticker.len()
    }

    /// Returns true if the directory has no listings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_ticker.is_empty()
    }
}

/// A located annual filing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filing {
    /// Accession number with dashes stripped (as used in archive paths).
    pub accession_number: String,
    /// Primary document filename.
    pub primary_document: String,
    /// Form type (e.g., "10-K").
    pub form: String,
    /// Period of report (fiscal year end), when the submissions API provides one.
    pub period: Option<NaiveDate>,
}

/// One dimensional qualifier on a context.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    /// Axis (dimension) QName, e.g. `us-gaap:StatementBusinessSegmentsAxis`.
    pub axis: String,
    /// Member QName, e.g. `aapl:AmericasSegmentMember`.
    pub member: String,
}

impl Dimension {
    /// Creates a new dimension qualifier.
    #[must_use]
    pub fn new(axis: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            axis: axis.into(),
            member: member.into(),
        }
    }
}

/// Reporting period of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextPeriod {
    /// A span of time (income statement items).
    Duration {
        /// First day of the period.
        start: NaiveDate,
        /// Last day of the period.
        end: NaiveDate,
    },
    /// A point in time (balance sheet items).
    Instant(NaiveDate),
}

impl ContextPeriod {
    /// Returns the end date, or the instant for point-in-time periods.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        match self {
            Self::Duration { end, .. } => *end,
            Self::Instant(date) => *date,
        }
    }

    /// Returns true for point-in-time periods.
    #[must_use]
    pub const fn is_instant(&self) -> bool {
        matches!(self, Self::Instant(_))
    }
}

/// A dimensionally-qualified reporting context from an instance document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XbrlContext {
    /// The context `id` attribute.
    pub context_id: String,
    /// Explicit dimension qualifiers, in document order. Never empty.
    pub dimensions: Vec<Dimension>,
    /// Reporting period.
    pub period: ContextPeriod,
}

impl XbrlContext {
    /// Returns true if the context is a point in time.
    #[must_use]
    pub const fn is_instant(&self) -> bool {
        self.period.is_instant()
    }

    /// Returns the end date (or instant) of the context.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.period.end_date()
    }
}

/// A tagged revenue value from an instance document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevenueFact {
    /// Concept QName, e.g. `us-gaap:Revenues`.
    pub concept: String,
    /// Id of the context the fact applies to.
    pub context_ref: String,
    /// Value, already multiplied out by any inline `scale`.
    pub value: f64,
    /// Unit reference, when present.
    pub unit_ref: Option<String>,
}

/// Revenue attributed to one segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Cleaned, human-readable segment name.
    pub name: String,
    /// Segment revenue.
    pub revenue: f64,
}

impl Segment {
    /// Creates a new segment.
    #[must_use]
    pub fn new(name: impl Into<String>, revenue: f64) -> Self {
        Self {
            name: name.into(),
            revenue,
        }
    }
}

/// Whether a segment breakdown is by region or by business line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    /// Segments are regions or countries.
    Geographic,
    /// Segments are business lines (the default).
    #[default]
    Business,
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geographic => f.write_str("geographic"),
            Self::Business => f.write_str("business"),
        }
    }
}

/// Segments sorted by descending revenue, plus their classification.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSet {
    /// Segments, largest revenue first.
    pub segments: Vec<Segment>,
    /// Classification of the set.
    pub segment_type: SegmentType,
}

impl SegmentSet {
    /// An empty "not disclosed" result.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if no segments were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

/// The single most recent annual value selected for a metric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricValue {
    /// The reported value.
    pub value: f64,
    /// Four-digit year of the period end.
    pub period_year: String,
}

impl MetricValue {
    /// Creates a new metric value.
    #[must_use]
    pub fn new(value: f64, period_year: impl Into<String>) -> Self {
        Self {
            value,
            period_year: period_year.into(),
        }
    }
}

/// Consolidated metrics. Missing metrics serialize as `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    /// Total revenue.
    pub revenue: Option<MetricValue>,
    /// Cost of revenue (COGS).
    pub cogs: Option<MetricValue>,
    /// Operating expenses.
    pub opex: Option<MetricValue>,
    /// Capital expenditures.
    pub capex: Option<MetricValue>,
    /// Net income.
    pub net_income: Option<MetricValue>,
    /// Employee count.
    pub employees: Option<MetricValue>,
}

/// The assembled extraction result for one filer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyReport {
    /// Zero-padded CIK.
    pub cik: Cik,
    /// Registrant name.
    pub entity_name: String,
    /// Primary ticker, when the filer is listed.
    pub ticker: Option<Ticker>,
    /// SIC industry description.
    pub sic_description: Option<String>,
    /// Period of report of the latest 10-K.
    pub filing_period: Option<NaiveDate>,
    /// Consolidated metrics.
    pub financials: Financials,
    /// Segment breakdown, largest first. Empty when not disclosed.
    pub segments: Vec<Segment>,
    /// Classification of `segments`; `None` when no segments were extracted.
    pub segment_type: Option<SegmentType>,
}

impl CompanyReport {
    /// Creates a report with no metrics and no segments.
    #[must_use]
    pub fn new(cik: Cik, entity_name: impl Into<String>) -> Self {
        Self {
            cik,
            entity_name: entity_name.into(),
            ticker: None,
            sic_description: None,
            filing_period: None,
            financials: Financials::default(),
            segments: Vec::new(),
            segment_type: None,
        }
    }

    /// Attaches a segment breakdown.
    #[must_use]
    pub fn with_segments(mut self, set: SegmentSet) -> Self {
        self.segment_type = (!set.is_empty()).then_some(set.segment_type);
        self.segments = set.segments;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cik_parsing_and_padding() {
        let cik: Cik = "320193".parse().unwrap();
        assert_eq!(cik.padded(), "0000320193");
        assert_eq!(cik.unpadded(), "320193");
        assert_eq!(cik, "0000320193".parse().unwrap());
        assert_eq!(cik, "CIK0000320193".parse().unwrap());
        assert_eq!(cik.to_string(), "0000320193");
    }

    #[test]
    fn test_cik_rejects_garbage() {
        assert!("".parse::<Cik>().is_err());
        assert!("AAPL".parse::<Cik>().is_err());
        assert!("12345678901".parse::<Cik>().is_err());
        assert!("-5".parse::<Cik>().is_err());
    }

    #[test]
    fn test_ticker_creation() {
        assert_eq!(Ticker::new(" brk-b ").as_str(), "BRK-B");
        assert!(Ticker::new("  ").is_empty());
    }

    #[test]
    fn test_directory_primary_ticker() {
        let directory = TickerDirectory::from_entries([
            TickerEntry {
                ticker: Ticker::new("GOOGL"),
                cik: Cik::new(1_652_044),
                title: "Alphabet Inc.".to_string(),
            },
            TickerEntry {
                ticker: Ticker::new("GOOG"),
                cik: Cik::new(1_652_044),
                title: "Alphabet Inc.".to_string(),
            },
        ]);

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get("goog").unwrap().cik, Cik::new(1_652_044));
        assert_eq!(
            directory.ticker_for(Cik::new(1_652_044)).unwrap().as_str(),
            "GOOGL"
        );
        assert!(directory.ticker_for(Cik::new(1)).is_none());
    }

    #[test]
    fn test_report_serializes_nulls() {
        let report = CompanyReport::new(Cik::new(320_193), "Apple Inc.");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["cik"], "0000320193");
        assert_eq!(json["entityName"], "Apple Inc.");
        assert!(json["ticker"].is_null());
        assert!(json["filingPeriod"].is_null());
        assert!(json["financials"]["revenue"].is_null());
        assert!(json["financials"]["netIncome"].is_null());
        assert_eq!(json["segments"], serde_json::json!([]));
        assert!(json["segmentType"].is_null());
    }

    #[test]
    fn test_report_with_segments() {
        let set = SegmentSet {
            segments: vec![Segment::new("Americas", 10.0)],
            segment_type: SegmentType::Geographic,
        };
        let report = CompanyReport::new(Cik::new(1), "X").with_segments(set);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["segmentType"], "geographic");
        assert_eq!(json["segments"][0]["name"], "Americas");

        let empty = CompanyReport::new(Cik::new(1), "X").with_segments(SegmentSet::empty());
        assert!(empty.segment_type.is_none());
    }

    #[test]
    fn test_metric_value_shape() {
        let metric = MetricValue::new(383_285_000_000.0, "2023");
        let json = serde_json::to_value(&metric).unwrap();
        assert_eq!(json["periodYear"], "2023");
        assert_eq!(json["value"], 383_285_000_000.0);
    }
}
