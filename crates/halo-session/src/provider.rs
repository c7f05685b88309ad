//! Seam to the external identity provider.

use async_trait::async_trait;

/// Boxed error type for provider-side failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The two inbound dependencies of the access layer, behind one seam.
///
/// Implemented by the identity-provider integration; tests swap in fixed
/// fakes.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Yield a fresh raw bearer credential.
    ///
    /// Must only fail to signal provider-side failure; the session surfaces
    /// that as a renewal error and leaves the shared cache untouched.
    async fn fresh_credential(&self) -> Result<String, BoxError>;

    /// Whether the user is currently signed in.
    fn is_signed_in(&self) -> bool;
}
