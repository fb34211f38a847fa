//! Mapping extraction errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use filings::FilingsError;
use serde_json::json;
use tracing::warn;

/// An extraction error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub FilingsError);

impl From<FilingsError> for ApiError {
    fn from(error: FilingsError) -> Self {
        Self(error)
    }
}

impl ApiError {
    /// Status code for the error: bad input is 400, an unknown filer 404, anything else
    /// is treated as an upstream failure.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.0 {
            FilingsError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            FilingsError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self.0, "Request failed upstream");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
