//! # halo-session
//!
//! Bridges the identity provider's "signed in" signal and credential
//! callback into the authenticated API client.
//!
//! The UI shell owns the provider; this crate owns nothing but glue. The
//! authenticated state is re-derived on every call from the live signal and
//! the shared credential cache, never cached stale.

#![deny(unsafe_code)]

pub mod errors;
pub mod provider;
pub mod session;

pub use errors::SessionError;
pub use provider::{BoxError, IdentityProvider};
pub use session::Session;
