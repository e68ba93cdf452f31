//! Error types for the explorer engine.
//!
//! Errors are returned as values and rendered by the view layer:
//!
//! - [`FetchError`] - A single backend request failed
//! - [`ExplorerError`] - Tree store and mutation reconciler failures
//! - [`StorageError`] - localStorage operations for persisted UI state

use thiserror::Error;

/// Generic message used when the backend gives no usable error text.
pub const GENERIC_FAILURE: &str = "Request failed";

/// Network/fetch-related errors for backend requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Failed to build the HTTP request (e.g. body serialization)
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (connection refused, CORS, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status) without a backend message
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Response body could not be read or parsed
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// Backend answered with an `{ error }` body
    #[error("{0}")]
    Backend(String),
}

impl FetchError {
    /// Message suitable for a mutation error banner.
    ///
    /// Backend-provided messages are shown verbatim; everything else
    /// collapses to the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend(msg) if !msg.trim().is_empty() => msg.clone(),
            Self::HttpError(status) => format!("{} (HTTP {})", GENERIC_FAILURE, status),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Failures surfaced by the tree store and the mutation reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplorerError {
    /// Loading the tree failed after all attempts
    #[error("Failed to load files: {0}")]
    Fetch(#[from] FetchError),
    /// A create/delete/rename call failed
    #[error("{0}")]
    Mutation(String),
    /// Rename target rejected before any network call
    #[error("Invalid name '{0}': use letters, numbers, spaces, '-', '_' or '.'")]
    InvalidName(String),
    /// The owning view was torn down while the request was outstanding
    #[error("Explorer was closed")]
    Disposed,
}

/// Storage errors for persisted explorer state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// localStorage not available
    #[error("localStorage not available")]
    StorageUnavailable,
    /// Failed to serialize data to JSON
    #[error("failed to serialize data")]
    SerializationFailed,
    /// Failed to write to storage
    #[error("failed to save to localStorage")]
    WriteFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_text() {
        let err = FetchError::Backend("File already exists".to_string());
        assert_eq!(err.user_message(), "File already exists");
    }

    #[test]
    fn test_user_message_fallbacks() {
        assert_eq!(FetchError::Backend("  ".to_string()).user_message(), GENERIC_FAILURE);
        assert_eq!(
            FetchError::JsonParseError("eof".to_string()).user_message(),
            GENERIC_FAILURE
        );
        assert_eq!(
            FetchError::HttpError(500).user_message(),
            "Request failed (HTTP 500)"
        );
    }

    #[test]
    fn test_fetch_error_converts_into_explorer_error() {
        let err: ExplorerError = FetchError::HttpError(502).into();
        assert_eq!(err.to_string(), "Failed to load files: HTTP error: 502");
    }
}
