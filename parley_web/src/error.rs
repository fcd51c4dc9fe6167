//! Error types for the web front-end.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parley_conversation::HistoryError;
use thiserror::Error;

use crate::api::types::StatusMessage;

/// Request failures that end in a `{status: "error", message}` envelope.
#[derive(Debug, Error)]
pub enum WebError {
    /// Chat message blank after trimming.
    #[error("Empty message")]
    EmptyMessage,

    /// Delete index outside the current history.
    #[error("Invalid index")]
    InvalidIndex,

    /// Page form missing or malformed.
    #[error("Bad request: {0}")]
    InvalidForm(String),

    /// Anything else raised while handling a request body.
    #[error("{0}")]
    Unclassified(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Session storage error: {0}")]
    Storage(anyhow::Error),
}

impl WebError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyMessage | Self::InvalidIndex | Self::InvalidForm(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Unclassified(_) | Self::Template(_) | Self::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        }
        (status, Json(StatusMessage::error(self.to_string()))).into_response()
    }
}

impl From<HistoryError> for WebError {
    fn from(error: HistoryError) -> Self {
        match error {
            HistoryError::InvalidIndex { .. } => Self::InvalidIndex,
            HistoryError::Storage(e) => Self::Storage(e),
        }
    }
}

/// Result type for request handlers.
pub type Result<T> = std::result::Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            WebError::EmptyMessage.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::InvalidIndex.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::InvalidForm("missing field".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::Unclassified("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_history_errors_map_to_fixed_messages() {
        let err: WebError = HistoryError::InvalidIndex { index: 9, len: 3 }.into();
        assert_eq!(err.to_string(), "Invalid index");

        let err: WebError = HistoryError::Storage(anyhow::anyhow!("disk gone")).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
