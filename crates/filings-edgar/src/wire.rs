// =============================================================================
// SEC API Response Types
// =============================================================================

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Company ticker information from SEC JSON.
///
/// `company_tickers.json` is an object keyed by row index (`"0"`, `"1"`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct TickerListing {
    /// CIK as a number (SEC returns this as an integer)
    pub cik_str: u64,
    /// Ticker symbol
    pub ticker: String,
    /// Company name
    #[serde(default)]
    pub title: String,
}

/// Response from the SEC EDGAR Company Facts API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFacts {
    /// Entity name
    #[serde(default)]
    pub entity_name: String,
    /// Facts organized by taxonomy and tag
    #[serde(default)]
    pub facts: HashMap<String, HashMap<String, TagFacts>>,
}

/// Facts for a specific XBRL tag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagFacts {
    /// Units (USD, shares, pure, ...) containing the actual fact values
    #[serde(default)]
    pub units: BTreeMap<String, Vec<FactValue>>,
}

/// A single fact value with metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct FactValue {
    /// Start date of the period (absent for instants)
    #[serde(default)]
    pub start: Option<String>,
    /// End date of the period
    pub end: String,
    /// Value
    pub val: f64,
    /// Fiscal period
    #[serde(default)]
    pub fp: Option<String>,
    /// Form type
    #[serde(default)]
    pub form: Option<String>,
}

/// Company submissions/filings metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submissions {
    /// Company name
    #[serde(default)]
    pub name: String,
    /// Tickers listed for the filer
    #[serde(default)]
    pub tickers: Vec<String>,
    /// SIC description
    #[serde(default)]
    pub sic_description: Option<String>,
    /// Filing history
    #[serde(default)]
    pub filings: FilingHistory,
}

/// Filing history block of the submissions response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilingHistory {
    /// Most recent filings, newest first
    #[serde(default)]
    pub recent: RecentFilings,
}

/// Parallel arrays describing recent filings, newest first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFilings {
    /// Accession numbers (with dashes)
    #[serde(default)]
    pub accession_number: Vec<String>,
    /// Period of report dates (may be empty strings)
    #[serde(default)]
    pub report_date: Vec<String>,
    /// Form types
    #[serde(default)]
    pub form: Vec<String>,
    /// Primary document filenames
    #[serde(default)]
    pub primary_document: Vec<String>,
}

/// Directory listing of a filing (`index.json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilingIndex {
    /// The directory
    #[serde(default)]
    pub directory: FilingDirectory,
}

/// Directory contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilingDirectory {
    /// Directory path
    #[serde(default)]
    pub name: String,
    /// Files in the directory
    #[serde(default)]
    pub item: Vec<DirectoryItem>,
}

/// A single file in a filing directory.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryItem {
    /// Filename
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_facts_deserialize() {
        let json = r#"{
            "cik": 320193,
            "entityName": "Apple Inc.",
            "facts": {
                "us-gaap": {
                    "Revenues": {
                        "label": null,
                        "units": {
                            "USD": [{"end": "2023-09-30", "val": 383285000000, "fy": 2023, "fp": "FY", "form": "10-K"}]
                        }
                    }
                }
            }
        }"#;

        let facts: CompanyFacts = serde_json::from_str(json).unwrap();
        assert_eq!(facts.entity_name, "Apple Inc.");
        let values = &facts.facts["us-gaap"]["Revenues"].units["USD"];
        assert_eq!(values[0].val, 383_285_000_000.0);
        assert_eq!(values[0].form.as_deref(), Some("10-K"));
    }

    #[test]
    fn test_submissions_deserialize_missing_history() {
        let submissions: Submissions =
            serde_json::from_str(r#"{"name": "Shell Co", "sicDescription": "Blank Checks"}"#)
                .unwrap();
        assert_eq!(submissions.name, "Shell Co");
        assert_eq!(submissions.sic_description.as_deref(), Some("Blank Checks"));
        assert!(submissions.filings.recent.form.is_empty());
    }

    #[test]
    fn test_filing_index_deserialize() {
        let json = r#"{"directory": {"name": "/Archives/edgar/data/320193/000032019323000106",
            "item": [{"name": "aapl-20230930_htm.xml", "type": "text.gif", "size": "1234"},
                     {"name": "0000320193-23-000106-index-headers.html", "type": "text.gif", "size": ""}]}}"#;
        let index: FilingIndex = serde_json::from_str(json).unwrap();
        assert_eq!(index.directory.item.len(), 2);
        assert_eq!(index.directory.item[0].name, "aapl-20230930_htm.xml");
    }
}
