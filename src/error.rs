use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Body message returned for every failed request
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Upstream API error: {0}")]
    Upstream(String),

    #[error("Malformed upstream payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for failures talking to the upstream API (transport, status, or payload)
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::HttpClient(_) | AppError::Upstream(_) | AppError::MalformedPayload(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Callers only ever see the generic message; the detail goes to the log.
        tracing::error!(error = %self, upstream = self.is_upstream(), "Request failed");

        let body = Json(json!({
            "error": GENERIC_ERROR_MESSAGE
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
