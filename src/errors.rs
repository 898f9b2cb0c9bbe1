use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

use crate::services::transport::TransportError;

/// Standard error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// Which upstream fetch an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Points,
    Forecast,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Points => f.write_str("points"),
            Stage::Forecast => f.write_str("forecast"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("weather API request failed: {0}")]
    UpstreamUnavailable(#[from] TransportError),

    #[error("failed to get {stage} data: status code {status}")]
    UpstreamStatus { stage: Stage, status: u16 },

    #[error("malformed {stage} response: {detail}")]
    MalformedResponse { stage: Stage, detail: String },

    #[error("no forecast found for 'Today'")]
    NoMatchingPeriod,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UpstreamUnavailable(_)
            | AppError::UpstreamStatus { .. }
            | AppError::MalformedResponse { .. }
            | AppError::NoMatchingPeriod => {
                tracing::error!("Weather lookup failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        (status, axum::Json(ErrorResponse { error: message })).into_response()
    }
}
