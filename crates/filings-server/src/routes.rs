//! HTTP routes.

use axum::extract::{Query, State};
use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use filings::{CompanyQuery, CompanyReport, FilingsService};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

/// Query string of the financials endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct FinancialsParams {
    /// Ticker to look up.
    pub ticker: Option<String>,
    /// CIK to look up, padded or not.
    pub cik: Option<String>,
}

async fn financials(
    State(service): State<FilingsService>,
    Query(params): Query<FinancialsParams>,
) -> Result<Json<CompanyReport>, ApiError> {
    let query = CompanyQuery::from_params(params.ticker.as_deref(), params.cik.as_deref())?;
    let report = service.company_report(&query).await?;
    Ok(Json(report))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the application router.
pub fn build_app(service: FilingsService) -> Router {
    // Read-only API: any origin may GET
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/financials", get(financials))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
