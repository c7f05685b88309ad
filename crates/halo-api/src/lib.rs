//! # halo-api
//!
//! Authenticated HTTP client for the halo backend.
//!
//! Two capabilities:
//! - [`ApiClient::fetch_user`]: authenticated fetch of the `/user`
//!   resource with the standard URL-encoded bearer header
//! - [`ApiClient::discover_auth_format`]: diagnostic probe of which
//!   authorization header encoding the backend accepts
//!
//! One attempt per call, bounded by the configured timeout; retries are the
//! caller's concern. The probe lives in its own module and nothing in the
//! request path consults it.

#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod errors;
pub mod probe;

pub use client::{ApiClient, ProtectedResponse};
pub use config::ApiConfig;
pub use errors::ApiError;
pub use probe::{FormatProbe, HeaderFormat, ProbeAttempt};

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
