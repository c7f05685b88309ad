//! Session error types.

use thiserror::Error;

/// Errors surfaced by the session adapter.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A protected call was attempted while not authenticated. Checked
    /// before any network traffic.
    #[error("user is not authenticated")]
    NotAuthenticated,

    /// Credential renewal through the provider callback failed.
    #[error(transparent)]
    Auth(#[from] halo_auth::AuthError),

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] halo_api::ApiError),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
