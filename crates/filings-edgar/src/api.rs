//! Typed access to SEC resources on top of any [`SecFetcher`].

use crate::wire::{CompanyFacts, FilingIndex, Submissions, TickerListing};
use filings_core::{Cik, Filing, FilingsError, Result, SecFetcher};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Base URL for the SEC EDGAR JSON APIs
pub const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// Base URL for EDGAR filing archives
pub const ARCHIVES_BASE_URL: &str = "https://www.sec.gov/Archives/edgar/data";

/// SEC company tickers JSON endpoint
pub const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Where each SEC resource lives.
///
/// Defaults to the production SEC hosts; tests point these elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgarUrls {
    /// Host of the `api/xbrl` and `submissions` endpoints.
    pub data_base: String,
    /// Root of the filing archives (`.../Archives/edgar/data`).
    pub archives_base: String,
    /// Full URL of the ticker directory.
    pub company_tickers: String,
}

impl Default for EdgarUrls {
    fn default() -> Self {
        Self {
            data_base: EDGAR_BASE_URL.to_string(),
            archives_base: ARCHIVES_BASE_URL.to_string(),
            company_tickers: COMPANY_TICKERS_URL.to_string(),
        }
    }
}

impl EdgarUrls {
    /// Company facts URL (CIK zero-padded).
    #[must_use]
    pub fn company_facts(&self, cik: Cik) -> String {
        format!("{}/api/xbrl/companyfacts/CIK{}.json", self.data_base, cik.padded())
    }

    /// Submissions URL (CIK zero-padded).
    #[must_use]
    pub fn submissions(&self, cik: Cik) -> String {
        format!("{}/submissions/CIK{}.json", self.data_base, cik.padded())
    }

    /// Filing directory listing URL (CIK unpadded, accession without dashes).
    #[must_use]
    pub fn filing_index(&self, cik: Cik, accession: &str) -> String {
        format!("{}/{}/{}/index.json", self.archives_base, cik.unpadded(), accession)
    }

    /// URL of a single document inside a filing directory.
    #[must_use]
    pub fn filing_document(&self, cik: Cik, accession: &str, name: &str) -> String {
        format!("{}/{}/{}/{}", self.archives_base, cik.unpadded(), accession, name)
    }
}

/// Fetch a URL and decode its JSON body.
pub async fn fetch_json<T: DeserializeOwned>(fetcher: &dyn SecFetcher, url: &str) -> Result<T> {
    let body = fetcher.fetch_text(url).await?;
    serde_json::from_str(&body)
        .map_err(|e| FilingsError::Parse(format!("Failed to parse {url}: {e}")))
}

/// Typed SEC EDGAR API.
#[derive(Debug, Clone)]
pub struct EdgarApi {
    fetcher: Arc<dyn SecFetcher>,
    urls: EdgarUrls,
}

impl EdgarApi {
    /// Create an API over the given fetcher, targeting the production SEC hosts.
    pub fn new(fetcher: Arc<dyn SecFetcher>) -> Self {
        Self {
            fetcher,
            urls: EdgarUrls::default(),
        }
    }

    /// Override the resource locations.
    #[must_use]
    pub fn with_urls(mut self, urls: EdgarUrls) -> Self {
        self.urls = urls;
        self
    }

    /// The underlying fetcher.
    #[must_use]
    pub fn fetcher(&self) -> &Arc<dyn SecFetcher> {
        &self.fetcher
    }

    /// The resource locations in use.
    #[must_use]
    pub const fn urls(&self) -> &EdgarUrls {
        &self.urls
    }

    /// Fetch the SEC ticker directory, keyed by row index.
    #[instrument(skip(self))]
    pub async fn company_tickers(&self) -> Result<HashMap<String, TickerListing>> {
        debug!("Fetching company tickers from SEC");
        fetch_json(self.fetcher.as_ref(), &self.urls.company_tickers).await
    }

    /// Fetch the company facts for a CIK.
    #[instrument(skip(self), fields(cik = %cik))]
    pub async fn company_facts(&self, cik: Cik) -> Result<CompanyFacts> {
        let url = self.urls.company_facts(cik);
        debug!(url, "Fetching company facts");
        fetch_json(self.fetcher.as_ref(), &url).await
    }

    /// Fetch the submissions (filing history and metadata) for a CIK.
    #[instrument(skip(self), fields(cik = %cik))]
    pub async fn submissions(&self, cik: Cik) -> Result<Submissions> {
        let url = self.urls.submissions(cik);
        debug!(url, "Fetching company submissions");
        fetch_json(self.fetcher.as_ref(), &url).await
    }

    /// Fetch the directory listing of a filing.
    #[instrument(skip(self, filing), fields(cik = %cik, accession = %filing.accession_number))]
    pub async fn filing_index(&self, cik: Cik, filing: &Filing) -> Result<FilingIndex> {
        let url = self.urls.filing_index(cik, &filing.accession_number);
        debug!(url, "Fetching filing index");
        fetch_json(self.fetcher.as_ref(), &url).await
    }

    /// Fetch the raw text of a document inside a filing.
    #[instrument(skip(self, filing), fields(cik = %cik, accession = %filing.accession_number))]
    pub async fn filing_document(&self, cik: Cik, filing: &Filing, name: &str) -> Result<String> {
        let url = self.urls.filing_document(cik, &filing.accession_number, name);
        debug!(url, "Fetching filing document");
        self.fetcher.fetch_text(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticFetcher;

    #[test]
    fn test_url_shapes() {
        let urls = EdgarUrls::default();
        let cik = Cik::new(320_193);

        assert_eq!(
            urls.company_facts(cik),
            "https://data.sec.gov/api/xbrl/companyfacts/CIK0000320193.json"
        );
        assert_eq!(
            urls.submissions(cik),
            "https://data.sec.gov/submissions/CIK0000320193.json"
        );
        assert_eq!(
            urls.filing_index(cik, "000032019323000106"),
            "https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/index.json"
        );
        assert_eq!(
            urls.filing_document(cik, "000032019323000106", "aapl-20230930_htm.xml"),
            "https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/aapl-20230930_htm.xml"
        );
    }

    #[tokio::test]
    async fn test_with_urls_redirects_every_resource() {
        let urls = EdgarUrls {
            data_base: "http://mirror.test".to_string(),
            archives_base: "http://mirror.test/archives".to_string(),
            company_tickers: "http://mirror.test/tickers.json".to_string(),
        };
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with(
                    "http://mirror.test/tickers.json",
                    r#"{"0": {"cik_str": 42, "ticker": "ACME"}}"#,
                )
                .with(
                    "http://mirror.test/api/xbrl/companyfacts/CIK0000000042.json",
                    r#"{"entityName": "Acme Corp", "facts": {}}"#,
                )
                .with(
                    "http://mirror.test/submissions/CIK0000000042.json",
                    r#"{"name": "Acme Corp"}"#,
                )
                .with(
                    "http://mirror.test/archives/42/0001/index.json",
                    r#"{"directory": {"item": []}}"#,
                )
                .with("http://mirror.test/archives/42/0001/acme.xml", "<xbrl/>"),
        );
        let api = EdgarApi::new(fetcher.clone()).with_urls(urls.clone());
        assert_eq!(api.urls(), &urls);

        let cik = Cik::new(42);
        let filing = Filing {
            accession_number: "0001".to_string(),
            primary_document: "acme.htm".to_string(),
            form: "10-K".to_string(),
            period: None,
        };

        assert_eq!(api.company_tickers().await.unwrap()["0"].ticker, "ACME");
        assert_eq!(api.company_facts(cik).await.unwrap().entity_name, "Acme Corp");
        assert_eq!(api.submissions(cik).await.unwrap().name, "Acme Corp");
        assert!(api.filing_index(cik, &filing).await.unwrap().directory.item.is_empty());
        assert_eq!(api.filing_document(cik, &filing, "acme.xml").await.unwrap(), "<xbrl/>");
        assert_eq!(fetcher.hits(), 5);
    }
}
