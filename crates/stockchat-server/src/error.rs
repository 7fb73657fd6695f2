//! HTTP error classification
//!
//! Failures are sorted into client, not-found, upstream, and internal
//! categories instead of the single catch-all the service historically
//! had. Upstream and internal detail strings are logged server-side and
//! replaced with a generic message in the response body.

use crate::orchestrator::OrchestratorError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by the HTTP layer
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself was unusable
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// No chart has been rendered for the requested ticker
    #[error("no chart found for {0}")]
    ChartNotFound(String),

    /// The model API or the market-data provider failed
    #[error("upstream service failure")]
    Upstream(#[source] OrchestratorError),

    /// Anything else
    #[error("internal server error")]
    Internal(String),
}

impl From<OrchestratorError> for ApiError {
    fn from(err: OrchestratorError) -> Self {
        // Model API failures, market-data failures, and model-produced
        // malformed arguments are all artifacts of an upstream service
        ApiError::Upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::ChartNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Upstream(source) => {
                tracing::error!(error = %source, "Upstream failure");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = serde_json::json!({ "detail": detail });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_ticker() {
        let err = ApiError::ChartNotFound("AAPL".to_string());
        assert_eq!(err.to_string(), "no chart found for AAPL");
    }

    #[test]
    fn upstream_message_does_not_leak_detail() {
        let inner = OrchestratorError::Tool {
            name: "get_stock_price".to_string(),
            source: stockchat_tools::ToolError::Failed(
                "Yahoo Finance error: connection refused".to_string(),
            ),
        };
        let err = ApiError::from(inner);
        // The generic display string is what reaches the response body
        assert_eq!(err.to_string(), "upstream service failure");
    }
}
