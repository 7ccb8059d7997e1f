//! API error model
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use payout_core::PayoutError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("BATCH/{size} articles exceeds the limit of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("BODY/{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    Payout(#[from] PayoutError),

    #[error("METRICS/{0}")]
    Metrics(#[from] prometheus::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Payout(PayoutError::InvalidMetric { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Payout(_) | ApiError::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BatchTooLarge { .. } => "batch_too_large",
            ApiError::InvalidBody(_) => "invalid_body",
            ApiError::Payout(PayoutError::InvalidMetric { .. }) => "invalid_metric",
            ApiError::Payout(_) => "payout_error",
            ApiError::Metrics(_) => "metrics_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string(), "code": self.code() }))).into_response()
    }
}
