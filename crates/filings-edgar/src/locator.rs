//! Locate the latest annual filing and its XBRL instance document.

use crate::concepts::ANNUAL_FORM;
use crate::wire::{FilingIndex, RecentFilings};
use chrono::NaiveDate;
use filings_core::Filing;

/// Linkbase suffixes that are never instance documents.
const LINKBASE_SUFFIXES: &[&str] = &["_cal.xml", "_def.xml", "_lab.xml", "_pre.xml"];

/// EDGAR rendering summary, present in most filing directories.
const FILING_SUMMARY: &str = "filingsummary.xml";

/// Find the latest 10-K in the submissions' recent filings.
///
/// The parallel arrays are reverse-chronological, so the first `10-K` is the latest.
/// Amendments (`10-K/A`) are not annual reports in their own right and are skipped.
#[must_use]
pub fn latest_annual_filing(recent: &RecentFilings) -> Option<Filing> {
    let index = recent.form.iter().position(|form| form == ANNUAL_FORM)?;
    let accession = recent.accession_number.get(index)?;

    Some(Filing {
        accession_number: accession.replace('-', ""),
        primary_document: recent
            .primary_document
            .get(index)
            .cloned()
            .unwrap_or_default(),
        form: ANNUAL_FORM.to_string(),
        period: recent
            .report_date
            .get(index)
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()),
    })
}

/// Select the XBRL instance document from a filing directory listing.
///
/// Prefers the inline-XBRL companion (`*_htm.xml`), otherwise the first `.xml` file that
/// is not a linkbase or the filing summary.
#[must_use]
pub fn select_instance_document(index: &FilingIndex) -> Option<&str> {
    let names = || index.directory.item.iter().map(|item| item.name.as_str());

    names()
        .find(|name| name.to_ascii_lowercase().ends_with("_htm.xml"))
        .or_else(|| names().find(|name| is_instance_candidate(name)))
}

fn is_instance_candidate(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".xml")
        && lower != FILING_SUMMARY
        && !LINKBASE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{DirectoryItem, FilingDirectory};
    use rstest::rstest;

    fn recent() -> RecentFilings {
        RecentFilings {
            accession_number: vec![
                "0000320193-24-000010".to_string(),
                "0000320193-23-000106".to_string(),
                "0000320193-22-000108".to_string(),
            ],
            report_date: vec![
                "2023-12-30".to_string(),
                "2023-09-30".to_string(),
                "2022-09-24".to_string(),
            ],
            form: vec!["10-Q".to_string(), "10-K".to_string(), "10-K".to_string()],
            primary_document: vec![
                "aapl-20231230.htm".to_string(),
                "aapl-20230930.htm".to_string(),
                "aapl-20220924.htm".to_string(),
            ],
        }
    }

    fn index(names: &[&str]) -> FilingIndex {
        FilingIndex {
            directory: FilingDirectory {
                name: String::new(),
                item: names
                    .iter()
                    .map(|name| DirectoryItem {
                        name: (*name).to_string(),
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn test_latest_annual_filing() {
        let filing = latest_annual_filing(&recent()).unwrap();

        assert_eq!(filing.accession_number, "000032019323000106");
        assert_eq!(filing.primary_document, "aapl-20230930.htm");
        assert_eq!(filing.form, "10-K");
        assert_eq!(filing.period, NaiveDate::from_ymd_opt(2023, 9, 30));
    }

    #[test]
    fn test_no_annual_filing() {
        let mut recent = recent();
        recent.form = vec!["10-Q".into(), "10-K/A".into(), "8-K".into()];
        assert!(latest_annual_filing(&recent).is_none());
        assert!(latest_annual_filing(&RecentFilings::default()).is_none());
    }

    #[rstest]
    #[case(&["FilingSummary.xml", "aapl-20230930_cal.xml", "aapl-20230930_htm.xml"], Some("aapl-20230930_htm.xml"))]
    #[case(&["FilingSummary.xml", "msft-20230630_lab.xml", "msft-20230630.xml"], Some("msft-20230630.xml"))]
    #[case(&["x_pre.xml", "x_def.xml", "x.xsd", "x.htm"], None)]
    #[case(&[], None)]
    fn test_select_instance_document(#[case] names: &[&str], #[case] expected: Option<&str>) {
        assert_eq!(select_instance_document(&index(names)), expected);
    }
}
