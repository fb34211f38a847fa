//! Request orchestration: one query in, one [`CompanyReport`] out.

use std::fmt;
use std::sync::Arc;

use futures::try_join;
use tracing::{debug, info, instrument, warn};

use filings_cache::InMemoryTickerCache;
use filings_core::{
    Cik, CompanyReport, Filing, FilingsError, Result, SecFetcher, SegmentSet, Ticker, TickerCache,
};
use filings_edgar::{
    EdgarApi, EdgarClient, REVENUE_CONCEPTS, TickerResolver, aggregate_segments,
    extract_financials, latest_annual_filing, parse_contexts, parse_revenue_facts,
    select_instance_document,
};

/// Identifies the filer a report is requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyQuery {
    /// Look up by ticker (resolved through the SEC directory).
    Ticker(Ticker),
    /// Look up by CIK directly.
    Cik(Cik),
}

impl CompanyQuery {
    /// Build a query from optional request parameters.
    ///
    /// Blank values count as absent. When both are given the CIK is used.
    ///
    /// # Errors
    /// [`FilingsError::InvalidParameter`] when neither is given or the CIK is malformed.
    pub fn from_params(ticker: Option<&str>, cik: Option<&str>) -> Result<Self> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty())
        }

        if let Some(cik) = present(cik) {
            return Ok(Self::Cik(cik.parse()?));
        }
        if let Some(ticker) = present(ticker) {
            return Ok(Self::Ticker(Ticker::new(ticker)));
        }
        Err(FilingsError::InvalidParameter(
            "Either ticker or cik is required".to_string(),
        ))
    }
}

impl fmt::Display for CompanyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ticker(ticker) => write!(f, "ticker {ticker}"),
            Self::Cik(cik) => write!(f, "CIK {cik}"),
        }
    }
}

/// Extraction service composing the EDGAR pipeline.
///
/// Cheap to clone; clones share the fetcher (and its rate limiter) and the ticker cache.
///
/// # Example
///
/// ```no_run
/// use filings::{CompanyQuery, FilingsService};
///
/// #[tokio::main]
/// async fn main() -> filings::Result<()> {
///     let service = FilingsService::edgar("MyApp/1.0 (contact@example.com)")?;
///
///     let query = CompanyQuery::from_params(Some("AAPL"), None)?;
///     let report = service.company_report(&query).await?;
///     println!("{} segments: {:?}", report.entity_name, report.segments);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FilingsService {
    api: EdgarApi,
    tickers: TickerResolver,
}

impl FilingsService {
    /// Create a service over a fetcher with a process-lifetime ticker cache.
    pub fn new(fetcher: Arc<dyn SecFetcher>) -> Self {
        Self::with_cache(fetcher, Arc::new(InMemoryTickerCache::new()))
    }

    /// Create a service over a fetcher with the given ticker cache.
    pub fn with_cache(fetcher: Arc<dyn SecFetcher>, cache: Arc<dyn TickerCache>) -> Self {
        Self::from_api(EdgarApi::new(fetcher), cache)
    }

    /// Create a service over a configured API.
    pub fn from_api(api: EdgarApi, cache: Arc<dyn TickerCache>) -> Self {
        debug!(fetcher = api.fetcher().name(), "Creating filings service");
        let tickers = TickerResolver::new(api.clone(), cache);
        Self { api, tickers }
    }

    /// Create a service talking to the SEC with the default client settings.
    pub fn edgar(user_agent: &str) -> Result<Self> {
        Ok(Self::new(Arc::new(EdgarClient::new(user_agent)?)))
    }

    /// The typed SEC API in use.
    #[must_use]
    pub const fn api(&self) -> &EdgarApi {
        &self.api
    }

    /// The ticker resolver in use.
    #[must_use]
    pub const fn tickers(&self) -> &TickerResolver {
        &self.tickers
    }

    /// Build the full report for a filer.
    ///
    /// Consolidated facts and submissions are fetched concurrently and both are required:
    /// failures there abort the request. The segment breakdown is best effort and degrades
    /// to empty on any failure.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn company_report(&self, query: &CompanyQuery) -> Result<CompanyReport> {
        let (cik, ticker) = self.resolve(query).await?;

        let (facts, submissions) =
            try_join!(self.api.company_facts(cik), self.api.submissions(cik))?;

        let financials = extract_financials(&facts);
        let filing = latest_annual_filing(&submissions.filings.recent);

        let segments = match &filing {
            Some(filing) => self.segments(cik, filing).await,
            None => Err(FilingsError::NoFilingFound(cik.to_string())),
        }
        .unwrap_or_else(|e| {
            if e.is_not_disclosed() {
                debug!(error = %e, "No segment data");
            } else {
                warn!(error = %e, "Segment extraction failed");
            }
            SegmentSet::empty()
        });

        let entity_name = if facts.entity_name.is_empty() {
            submissions.name
        } else {
            facts.entity_name
        };
        let ticker = ticker.or_else(|| submissions.tickers.first().map(Ticker::new));

        let mut report = CompanyReport::new(cik, entity_name);
        report.ticker = ticker;
        report.sic_description = submissions.sic_description.filter(|s| !s.is_empty());
        report.filing_period = filing.and_then(|f| f.period);
        report.financials = financials;
        let report = report.with_segments(segments);

        info!(
            cik = %report.cik,
            segments = report.segments.len(),
            "Built company report"
        );
        Ok(report)
    }

    /// Resolve a query to a CIK and the filer's primary ticker.
    ///
    /// The primary ticker is reported for either query form, so `GOOG` and Alphabet's CIK
    /// produce the same report.
    async fn resolve(&self, query: &CompanyQuery) -> Result<(Cik, Option<Ticker>)> {
        match query {
            CompanyQuery::Ticker(ticker) => {
                let entry = self.tickers.resolve(ticker.as_str()).await?;
                let primary = self
                    .tickers
                    .ticker_for(entry.cik)
                    .await?
                    .unwrap_or(entry.ticker);
                Ok((entry.cik, Some(primary)))
            }
            CompanyQuery::Cik(cik) => {
                let ticker = self.tickers.ticker_for(*cik).await.unwrap_or_else(|e| {
                    warn!(error = %e, "Ticker directory unavailable for reverse lookup");
                    None
                });
                Ok((*cik, ticker))
            }
        }
    }

    /// Extract the segment breakdown from a located filing.
    ///
    /// # Errors
    /// [`FilingsError::NoInstanceDocument`] or [`FilingsError::EmptyYield`] when the filing
    /// discloses nothing usable, besides any fetch or parse failure.
    #[instrument(skip(self, filing), fields(cik = %cik, accession = %filing.accession_number))]
    pub async fn segments(&self, cik: Cik, filing: &Filing) -> Result<SegmentSet> {
        let index = self.api.filing_index(cik, filing).await?;
        let instance = select_instance_document(&index)
            .ok_or_else(|| FilingsError::NoInstanceDocument(filing.accession_number.clone()))?;
        debug!(instance, "Selected instance document");

        let text = self.api.filing_document(cik, filing, instance).await?;

        let contexts = parse_contexts(&text)?;
        if contexts.is_empty() {
            return Err(FilingsError::EmptyYield(
                "no dimensioned contexts".to_string(),
            ));
        }
        let facts = parse_revenue_facts(&text)?;
        if facts.is_empty() {
            return Err(FilingsError::EmptyYield("no revenue facts".to_string()));
        }

        let set = aggregate_segments(&facts, &contexts, REVENUE_CONCEPTS, filing.period);
        if set.is_empty() {
            return Err(FilingsError::EmptyYield(
                "no revenue facts on segment contexts".to_string(),
            ));
        }
        Ok(set)
    }
}
