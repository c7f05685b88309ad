//! Session adapter over the credential cache and API client.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use halo_api::{ApiClient, FormatProbe, ProtectedResponse};
use halo_auth::CredentialCache;

use crate::errors::SessionError;
use crate::provider::IdentityProvider;

/// Per-consumer session over the shared credential cache.
///
/// Holds no derived state beyond the locally copied credential value. The
/// authenticated state is recomputed on every call from the live provider
/// signal and the cache entry.
pub struct Session {
    provider: Arc<dyn IdentityProvider>,
    cache: Arc<CredentialCache>,
    client: ApiClient,
    token: Mutex<Option<String>>,
}

impl Session {
    /// Create a session over a shared cache and configured client.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        cache: Arc<CredentialCache>,
        client: ApiClient,
    ) -> Self {
        Self {
            provider,
            cache,
            client,
            token: Mutex::new(None),
        }
    }

    /// Re-derive session state from the provider signal.
    ///
    /// Signed-in: obtain a credential through the shared cache (renewing
    /// via the provider callback on a cache miss) and keep the value
    /// locally. Signed-out: drop only the local value; the shared cache
    /// keeps its entry until the next renewal overwrites it or the process
    /// exits.
    #[instrument(skip_all)]
    pub async fn sync(&self) -> Result<(), SessionError> {
        if self.provider.is_signed_in() {
            let value = self
                .cache
                .credential(|| self.provider.fresh_credential())
                .await?;
            *self.token.lock().await = Some(value);
            debug!("session credential refreshed");
        } else {
            let mut token = self.token.lock().await;
            if token.take().is_some() {
                info!("signed out, dropping local credential value");
            }
        }
        Ok(())
    }

    /// Whether a protected call would currently be allowed.
    ///
    /// Recomputed on demand: the signed-in signal, a locally held value,
    /// and a usable cache entry must all hold.
    pub async fn is_authenticated(&self) -> bool {
        if !self.provider.is_signed_in() {
            return false;
        }
        if self.token.lock().await.is_none() {
            return false;
        }
        self.cache
            .current()
            .await
            .is_some_and(|credential| credential.is_usable())
    }

    /// Fetch the protected `/user` resource.
    ///
    /// Fails with [`SessionError::NotAuthenticated`] before any network
    /// traffic when the session is not authenticated.
    pub async fn get_protected(&self) -> Result<ProtectedResponse, SessionError> {
        let token = self.authenticated_token().await?;
        Ok(self.client.fetch_user(&token).await?)
    }

    /// Run the authorization header format probe.
    ///
    /// Diagnostic only; same authentication guard as [`Self::get_protected`].
    pub async fn probe_auth_formats(&self) -> Result<FormatProbe, SessionError> {
        let token = self.authenticated_token().await?;
        Ok(self.client.discover_auth_format(&token).await?)
    }

    /// The locally held token, guarded by the authenticated check.
    async fn authenticated_token(&self) -> Result<String, SessionError> {
        if !self.is_authenticated().await {
            return Err(SessionError::NotAuthenticated);
        }
        self.token
            .lock()
            .await
            .clone()
            .ok_or(SessionError::NotAuthenticated)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
