//! Authorization header format discovery.
//!
//! Diagnostic probe for backends with ambiguous auth header expectations:
//! tries a fixed, ordered catalogue of header encodings against
//! `GET /protected` and reports the first accepted one. Operational tooling
//! only: the request path always sends the standard URL-encoded bearer
//! header and never consults this module.

use reqwest::header::CONTENT_TYPE;
use tracing::{info, instrument, warn};

use crate::client::{ApiClient, urlencoded};
use crate::errors::ApiError;

/// One authorization header encoding the backend might accept.
///
/// The catalogue order is fixed: discovery is first-match-wins, so
/// reordering changes which format gets reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderFormat {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `Authorization: Bearer <url-encoded token>`
    BearerEncoded,
    /// `Authorization: <token>`
    TokenOnly,
    /// `Authorization: <url-encoded token>`
    TokenOnlyEncoded,
    /// `X-API-Token: <token>`
    CustomHeader,
    /// `Authorization: Bearer<token>`, no space; backends that split on
    /// the literal prefix rather than whitespace accept it
    BearerNoSpace,
}

impl HeaderFormat {
    /// Every candidate, in probe order.
    pub const CATALOGUE: [Self; 6] = [
        Self::Bearer,
        Self::BearerEncoded,
        Self::TokenOnly,
        Self::TokenOnlyEncoded,
        Self::CustomHeader,
        Self::BearerNoSpace,
    ];

    /// Human-readable label used in logs and reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bearer => "standard bearer",
            Self::BearerEncoded => "url-encoded bearer",
            Self::TokenOnly => "token only",
            Self::TokenOnlyEncoded => "url-encoded token only",
            Self::CustomHeader => "custom header",
            Self::BearerNoSpace => "bearer without space",
        }
    }

    /// Build the header this candidate sends.
    pub fn header(self, token: &str) -> (&'static str, String) {
        match self {
            Self::Bearer => ("authorization", format!("Bearer {token}")),
            Self::BearerEncoded => ("authorization", format!("Bearer {}", urlencoded(token))),
            Self::TokenOnly => ("authorization", token.to_string()),
            Self::TokenOnlyEncoded => ("authorization", urlencoded(token)),
            Self::CustomHeader => ("x-api-token", token.to_string()),
            Self::BearerNoSpace => ("authorization", format!("Bearer{token}")),
        }
    }
}

/// Outcome of a single probe attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeAttempt {
    /// Which candidate was tried.
    pub format: HeaderFormat,
    /// HTTP status the backend answered with, or `None` when the attempt
    /// failed in transport.
    pub status: Option<u16>,
}

/// Diagnostic report from a discovery run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatProbe {
    /// Attempts in the order they were issued, the accepted one included.
    pub attempts: Vec<ProbeAttempt>,
    /// The first candidate the backend accepted.
    pub matched: HeaderFormat,
}

impl ApiClient {
    /// Probe which authorization header format the backend accepts.
    ///
    /// Issues `GET /protected` once per catalogue candidate, in order,
    /// stopping at the first 2xx. An individual transport failure is
    /// recorded and skipped. With the catalogue exhausted the run reports
    /// [`ApiError::FormatsExhausted`], or a single aggregate transport
    /// failure when not one attempt reached the backend. No retries.
    #[instrument(skip_all)]
    pub async fn discover_auth_format(&self, token: &str) -> Result<FormatProbe, ApiError> {
        let url = format!("{}/protected", self.config.base_url);
        let mut attempts = Vec::with_capacity(HeaderFormat::CATALOGUE.len());

        for format in HeaderFormat::CATALOGUE {
            let (name, value) = format.header(token);
            let result = self
                .client
                .get(&url)
                .header(CONTENT_TYPE, "application/json")
                .header(name, value)
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status().as_u16();
                    info!(format = format.label(), status, "auth format probe");
                    attempts.push(ProbeAttempt {
                        format,
                        status: Some(status),
                    });
                    if response.status().is_success() {
                        info!(format = format.label(), "backend accepted auth format");
                        metrics::counter!("auth_format_probe_total", "outcome" => "matched")
                            .increment(1);
                        return Ok(FormatProbe {
                            attempts,
                            matched: format,
                        });
                    }
                }
                Err(e) => {
                    warn!(format = format.label(), "auth format probe failed: {e}");
                    attempts.push(ProbeAttempt {
                        format,
                        status: None,
                    });
                }
            }
        }

        if attempts.iter().all(|a| a.status.is_none()) {
            metrics::counter!("auth_format_probe_total", "outcome" => "unreachable").increment(1);
            return Err(ApiError::RequestFailed {
                status: None,
                message: "every auth format probe failed to reach the backend".to_string(),
            });
        }

        metrics::counter!("auth_format_probe_total", "outcome" => "exhausted").increment(1);
        Err(ApiError::FormatsExhausted {
            attempts: attempts.len(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
