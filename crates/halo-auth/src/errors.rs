//! Auth error types.

/// Errors that can occur while obtaining a credential.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The identity provider's renewal callback failed. The cache is left
    /// unchanged.
    #[error("credential renewal failed: {message}")]
    RenewalFailed {
        /// Error description from the provider.
        message: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
