use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::llm::LlmError;

/// Every way a request can fail, as reported to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Question is required")]
    Validation,
    #[error("AI service is not configured")]
    Configuration,
    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimit,
    #[error("AI credits depleted. Please add more credits to continue.")]
    QuotaExceeded,
    #[error("Failed to generate explanation")]
    Upstream,
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation => StatusCode::BAD_REQUEST,
            ApiError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            ApiError::QuotaExceeded => StatusCode::PAYMENT_REQUIRED,
            ApiError::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        let message = err.to_string();
        if message.is_empty() {
            ApiError::Internal("Unknown error".to_string())
        } else {
            ApiError::Internal(message)
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::NotConfigured => ApiError::Configuration,
            LlmError::RateLimited => ApiError::RateLimit,
            LlmError::QuotaExceeded => ApiError::QuotaExceeded,
            LlmError::Status { .. } => ApiError::Upstream,
            other @ (LlmError::Transport(_) | LlmError::InvalidResponse(_)) => {
                ApiError::internal(other)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
