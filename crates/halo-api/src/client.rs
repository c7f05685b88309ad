//! Authenticated HTTP client for the backend API.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::ApiConfig;
use crate::errors::ApiError;

/// User agent sent with every backend request.
const USER_AGENT: &str = "halo-client/0.1";

/// Parsed response from a protected backend endpoint: the JSON body
/// augmented with the HTTP status code.
#[derive(Clone, Debug, PartialEq)]
pub struct ProtectedResponse {
    /// HTTP status code of the response.
    pub status: u16,
    /// Parsed JSON body.
    pub body: Value,
}

/// HTTP client for one configured backend base address.
///
/// Reuses a single `reqwest` client bounded by the configured timeout.
#[derive(Clone, Debug)]
pub struct ApiClient {
    pub(crate) config: ApiConfig,
    pub(crate) client: reqwest::Client,
}

impl ApiClient {
    /// Create a client from config.
    pub fn new(config: ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Create a client that reuses an existing `reqwest` client.
    ///
    /// The shared client's own timeout policy applies.
    pub fn with_client(config: ApiConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Base address this client targets.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch the authenticated user resource.
    ///
    /// Issues a single `GET /user` with `Authorization: Bearer
    /// <url-encoded token>`. Exactly one attempt; retries are the caller's
    /// concern.
    #[instrument(skip_all)]
    pub async fn fetch_user(&self, token: &str) -> Result<ProtectedResponse, ApiError> {
        let url = format!("{}/user", self.config.base_url);
        debug!(token = %token_preview(token), %url, "calling protected endpoint");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", urlencoded(token)))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!("protected request failed in transport: {e}");
                ApiError::RequestFailed {
                    status: None,
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                status: Some(status.as_u16()),
                message: format!("backend returned status {status}"),
            });
        }

        let text = response.text().await.map_err(|e| ApiError::RequestFailed {
            status: Some(status.as_u16()),
            message: format!("failed to read response body: {e}"),
        })?;
        let body: Value = serde_json::from_str(&text)?;

        Ok(ProtectedResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// URL-encode a token for use in a header value.
pub(crate) fn urlencoded(s: &str) -> String {
    utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
}

/// First characters of the token, for diagnostics without leaking it.
fn token_preview(token: &str) -> String {
    let prefix: String = token.chars().take(10).collect();
    format!("{prefix}...")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ApiConfig::with_base_url(server.uri()))
    }

    #[tokio::test]
    async fn fetch_user_returns_body_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"a": 1})))
            .mount(&server)
            .await;

        let response = client_for(&server).fetch_user("tok").await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body["a"], 1);
    }

    #[tokio::test]
    async fn fetch_user_sends_url_encoded_bearer_header() {
        let server = MockServer::start().await;
        // Only the URL-encoded form matches; a raw "Bearer tok en" would 404
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("authorization", "Bearer tok%20en"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let response = client_for(&server).fetch_user("tok en").await.unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn fetch_user_non_2xx_fails_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_user("tok").await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::RequestFailed {
                status: Some(401),
                ..
            }
        ));
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn fetch_user_transport_failure_has_no_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        // A client that cannot complete any request in time
        let client = ApiClient::with_client(
            ApiConfig::with_base_url(server.uri()),
            reqwest::Client::builder()
                .timeout(Duration::from_nanos(1))
                .build()
                .unwrap(),
        );

        let err = client.fetch_user("tok").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::RequestFailed { status: None, .. }
        ));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn fetch_user_rejects_non_json_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_user("tok").await.unwrap_err();
        assert!(matches!(err, ApiError::Json(_)));
    }

    #[tokio::test]
    async fn fetch_user_issues_single_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let _ = client_for(&server).fetch_user("tok").await;

        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[test]
    fn urlencoded_basic() {
        assert_eq!(urlencoded("abc123"), "abc123");
        assert_eq!(urlencoded("a b&c"), "a%20b%26c");
        assert_eq!(urlencoded("ey.J0="), "ey%2EJ0%3D");
    }

    #[test]
    fn token_preview_truncates() {
        assert_eq!(token_preview("0123456789abcdef"), "0123456789...");
        assert_eq!(token_preview("short"), "short...");
    }
}
