//! API client configuration.
//!
//! Defaults target a local backend. Deployments override via environment
//! variables; invalid override values are ignored and fall back to the
//! default.

use std::time::Duration;

use tracing::debug;

/// Default backend base address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default bound on any single HTTP request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`ApiClient`](crate::ApiClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Backend base address, without a trailing slash.
    pub base_url: String,
    /// Bound on any single HTTP request, connection setup included.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Build a config from defaults plus environment overrides.
    ///
    /// - `HALO_API_URL`: backend base address
    /// - `HALO_HTTP_TIMEOUT_SECS`: request timeout in seconds (1 to 300)
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(v) = read_env_string("HALO_API_URL") {
            config.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = read_env_u64("HALO_HTTP_TIMEOUT_SECS", 1, 300) {
            config.timeout = Duration::from_secs(v);
        }
        config
    }

    /// Create a config targeting a specific base address, keeping the other
    /// defaults.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

/// Read a non-empty string env var.
fn read_env_string(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Read an integer env var within `[min, max]`.
fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(v) if (min..=max).contains(&v) => Some(v),
        _ => {
            debug!(name, %raw, "ignoring invalid environment override");
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
