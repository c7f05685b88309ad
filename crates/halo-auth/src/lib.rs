//! # halo-auth
//!
//! Bearer credential caching for the backend API client.
//!
//! Holds at most one credential per cache instance and renews it through a
//! caller-supplied callback when the entry is missing or inside the expiry
//! safety margin. One cache is constructed at the composition root and
//! shared via `Arc`, so a renewal performed for one consumer is visible to
//! all others. Concurrent renewals coalesce behind a single in-flight
//! callback.

#![deny(unsafe_code)]

pub mod cache;
pub mod credential;
pub mod errors;

pub use cache::CredentialCache;
pub use credential::{Credential, DEFAULT_TTL_MS, SAFETY_MARGIN_MS, now_ms};
pub use errors::AuthError;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
