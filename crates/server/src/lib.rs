//! Fieldcall Server
//!
//! HTTP surface for the field-rep calling engine: calling-list generation,
//! telephony provider webhooks, manual outcome recording and call-history
//! reads.

pub mod directory;
pub mod http;
pub mod metrics;
pub mod state;

pub use directory::{InMemoryFieldRepDirectory, InMemoryProspectDirectory};
pub use http::create_router;
pub use metrics::init_metrics;
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use fieldcall_dialer::DialerError;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No call history: {0}")]
    NoCallHistory(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DialerError> for ServerError {
    fn from(err: DialerError) -> Self {
        match err {
            DialerError::NoCallHistory { .. } => ServerError::NoCallHistory(err.to_string()),
            DialerError::Storage(msg) => ServerError::Storage(msg),
            DialerError::Directory(msg) => ServerError::Internal(msg),
        }
    }
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            // A business-rule conflict with current state, not a defect
            ServerError::NoCallHistory(_) => StatusCode::CONFLICT,
            // Retryable: upserts are idempotent, the provider resends
            ServerError::Storage(_) => StatusCode::BAD_GATEWAY,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let status = StatusCode::from(self);
        (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
    }
}
