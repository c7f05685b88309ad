//! API client error types.

use thiserror::Error;

/// Errors from calls against the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the request or it failed in transport. Never
    /// retried internally.
    #[error("protected request failed: {message}")]
    RequestFailed {
        /// HTTP status code (`None` for transport-level failures, timeouts
        /// included).
        status: Option<u16>,
        /// Error description.
        message: String,
    },

    /// Every authorization header candidate was rejected by the backend.
    /// Diagnostic outcome of format discovery only.
    #[error("no accepted auth header format after {attempts} candidates")]
    FormatsExhausted {
        /// Number of candidates tried.
        attempts: usize,
    },

    /// A successful response carried a body that is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status associated with this error, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            Self::FormatsExhausted { .. } | Self::Json(_) => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
