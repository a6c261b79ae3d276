// Error handling module
// Defines error types and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

/// Errors that can occur while talking to Salesforce
#[derive(Error, Debug)]
pub enum AppError {
    /// Salesforce reported an error in an otherwise well-formed response
    /// (invalid code, expired token, ...). Recovered by restarting the
    /// login flow instead of showing an error page.
    #[error("Salesforce error: {0}")]
    Auth(String),

    /// The outbound HTTP call itself failed (connect error, timeout,
    /// non-JSON body). Never conflated with `Auth`.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Well-formed JSON that lacks an `error` field but still does not
    /// decode into the expected shape.
    #[error("Malformed Salesforce response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Provider-reported failures restart the OAuth dance at the
            // code-less entry point.
            AppError::Auth(message) => {
                tracing::warn!("Salesforce reported '{}', restarting login flow", message);
                Redirect::to("/").into_response()
            }
            other => {
                tracing::error!("Request failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response()
            }
        }
    }
}

/// Result type alias for Salesforce operations
pub type Result<T> = std::result::Result<T, AppError>;
