use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type for admission operations
pub type Result<T> = std::result::Result<T, AdmissionError>;

/// Admission error types
#[derive(Error, Debug)]
pub enum AdmissionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded { retry_after_ms: u64 },

    #[error("Client IP not found")]
    ClientIpNotFound,

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdmissionError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdmissionError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AdmissionError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            AdmissionError::ClientIpNotFound => StatusCode::BAD_REQUEST,
            AdmissionError::ProductNotFound(_) => StatusCode::NOT_FOUND,
            AdmissionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AdmissionError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AdmissionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AdmissionError::RateLimitExceeded { retry_after_ms } => Json(json!({
                "error": self.to_string(),
                "status": status.as_u16(),
                "retry_after_ms": retry_after_ms,
            })),
            _ => Json(json!({
                "error": self.to_string(),
                "status": status.as_u16(),
            })),
        };

        (status, body).into_response()
    }
}
