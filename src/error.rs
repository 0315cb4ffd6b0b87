use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Caller-supplied parameters are malformed or precede the repository's history
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// GitHub quota exhausted
    #[error("{message}")]
    RateLimited {
        message: String,
        reset_at: Option<DateTime<Utc>>,
    },

    /// Any other failure while talking to GitHub
    #[error("{0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            Error::Internal(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("token") || lower.contains("secret") || lower.contains("key") {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }
            Error::BadRequest(msg) => format!("Bad request: {msg}"),
            Error::NotFound(msg) => format!("Not found: {msg}"),
            Error::RateLimited { message, .. } => format!("Rate limited: {message}"),
            Error::Upstream(msg) => format!("Upstream failure: {msg}"),
            Error::Config(msg) => format!("Configuration error: {msg}"),
            Error::Io(e) => format!("I/O error: {}", e.kind()),
        }
    }

    /// HTTP status the error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Error::Upstream(_) | Error::Config(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request error: {}", self.log_safe());
        } else {
            tracing::debug!("Request rejected: {}", self.log_safe());
        }

        let body = match &self {
            Error::RateLimited { message, reset_at } => json!({
                "error": message,
                "retry_after": reset_at.map(|at| at.to_rfc3339()),
            }),
            Error::BadRequest(msg) | Error::NotFound(msg) | Error::Upstream(msg) => json!({
                "error": msg,
            }),
            _ => json!({
                "error": "Internal server error",
            }),
        };

        (status, Json(body)).into_response()
    }
}
