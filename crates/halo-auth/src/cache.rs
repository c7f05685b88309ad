//! Shared credential cache with coalesced renewal.
//!
//! The cache never stores the renewal callback; callers pass it on every
//! lookup, which keeps the cache's lifetime independent of any one session.

use std::fmt::Display;
use std::future::Future;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::credential::Credential;
use crate::errors::AuthError;

/// Holds at most one credential and renews it on demand.
///
/// The inner mutex is held across the renewal await: concurrent callers
/// that miss the cache serialize behind a single in-flight renewal, and the
/// laggards observe the fresh entry without invoking their own callback.
#[derive(Debug, Default)]
pub struct CredentialCache {
    entry: Mutex<Option<Credential>>,
}

impl CredentialCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entry: Mutex::new(None),
        }
    }

    /// Return a usable credential value, renewing through `renew` if needed.
    ///
    /// A cached entry outside its safety margin is returned as-is with zero
    /// calls to `renew`. Otherwise `renew` runs once; on success the new
    /// value replaces the entry with the default lifetime, on failure the
    /// previous entry (if any) is retained untouched and the error surfaces
    /// as [`AuthError::RenewalFailed`].
    pub async fn credential<F, Fut, E>(&self, renew: F) -> Result<String, AuthError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
        E: Display,
    {
        let mut entry = self.entry.lock().await;

        if let Some(credential) = entry.as_ref() {
            if credential.is_usable() {
                debug!("serving cached credential");
                metrics::counter!("credential_renewal_total", "status" => "hit").increment(1);
                return Ok(credential.value.clone());
            }
        }

        info!("credential missing or inside safety margin, renewing");
        match renew().await {
            Ok(value) => {
                let credential = Credential::issued_now(value);
                let token = credential.value.clone();
                *entry = Some(credential);
                metrics::counter!("credential_renewal_total", "status" => "success").increment(1);
                Ok(token)
            }
            Err(e) => {
                warn!("credential renewal failed: {e}");
                metrics::counter!("credential_renewal_total", "status" => "failure").increment(1);
                Err(AuthError::RenewalFailed {
                    message: e.to_string(),
                })
            }
        }
    }

    /// Read the current entry without renewing.
    ///
    /// The returned credential may already be unusable; callers check
    /// [`Credential::is_usable`] themselves.
    pub async fn current(&self) -> Option<Credential> {
        self.entry.lock().await.clone()
    }

    #[cfg(test)]
    pub(crate) async fn set_entry(&self, credential: Option<Credential>) {
        *self.entry.lock().await = credential;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
