//! # HTTP Client
//!
//! Thin JSON-over-HTTP wrapper around `reqwest` for the backend.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Request Lifecycle                                    │
//! │                                                                         │
//! │  get/post/put/delete(segments)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  base URL + percent-encoded segments                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  send ── network failure ──────────────► RemoteError::Network           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2xx? ── no ── message | error | status text ─► RemoteError::Status     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  204 / empty body → JSON null, otherwise decode JSON                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{RemoteError, RemoteResult};

/// Backend base URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

// =============================================================================
// Configuration
// =============================================================================

/// Connection settings for [`HttpClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// e.g. `http://localhost:3001/api`
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// =============================================================================
// HTTP Client
// =============================================================================

/// JSON client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Builds a client, rejecting base URLs that are not http(s).
    pub fn new(config: &ClientConfig) -> RemoteResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> RemoteResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> RemoteResult<T> {
        let url = self.url(segments)?;
        debug!(method = "GET", %url, "Backend request");
        let response = self.send(self.client.get(url)).await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> RemoteResult<T> {
        let url = self.url(segments)?;
        debug!(method = "POST", %url, "Backend request");
        let response = self.send(self.client.post(url).json(body)).await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> RemoteResult<T> {
        let url = self.url(segments)?;
        debug!(method = "PUT", %url, "Backend request");
        let response = self.send(self.client.put(url).json(body)).await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request, ignoring any response body
    pub async fn delete(&self, segments: &[&str]) -> RemoteResult<()> {
        let url = self.url(segments)?;
        debug!(method = "DELETE", %url, "Backend request");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    /// Sends the request and turns non-2xx statuses into errors.
    async fn send(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // An unreadable body still yields a status-based message
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        debug!(status = status.as_u16(), %message, "Backend rejected request");

        Err(RemoteError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Decodes a successful response. 204 and empty bodies decode as JSON `null`.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> RemoteResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        let decoded = if status == StatusCode::NO_CONTENT || bytes.is_empty() {
            serde_json::from_value(Value::Null)
        } else {
            serde_json::from_slice(&bytes)
        };

        decoded.map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Parses and checks a backend base URL.
///
/// ## Example
/// ```rust
/// use shopfront_api::client::parse_base_url;
///
/// assert!(parse_base_url("http://localhost:3001/api").is_ok());
/// assert!(parse_base_url("ftp://example.com").is_err());
/// assert!(parse_base_url("localhost:3001").is_err());
/// ```
pub fn parse_base_url(raw: &str) -> RemoteResult<Url> {
    let invalid = |reason: String| RemoteError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

/// Picks the user-facing message for a failed response.
///
/// ## Precedence
/// 1. JSON body `message`
/// 2. JSON body `error`
/// 3. Non-JSON body: the status reason phrase
/// 4. `API request failed with status N`
pub fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = format!("API request failed with status {}", status.as_u16());

    match serde_json::from_str::<Value>(body) {
        Ok(json) => ["message", "error"]
            .iter()
            .find_map(|key| {
                json.get(key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or(fallback),
        Err(_) => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_precedence() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            error_message(status, r#"{"message":"Name taken","error":"dup"}"#),
            "Name taken"
        );
        assert_eq!(error_message(status, r#"{"error":"dup"}"#), "dup");
        assert_eq!(
            error_message(status, r#"{"detail":"nope"}"#),
            "API request failed with status 400"
        );
        assert_eq!(error_message(status, "<html>oops</html>"), "Bad Request");
        assert_eq!(
            error_message(StatusCode::from_u16(599).unwrap(), "oops"),
            "API request failed with status 599"
        );
    }

    #[test]
    fn test_url_segments_are_joined_and_encoded() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:3001/api/")).unwrap();
        let url = client.url(&["products", "P 1/2"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/api/products/P%201%2F2");

        let client = HttpClient::new(&ClientConfig::default()).unwrap();
        assert_eq!(
            client.url(&["bills"]).unwrap().as_str(),
            "http://localhost:3001/api/bills"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            HttpClient::new(&ClientConfig::new("not a url")),
            Err(RemoteError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            HttpClient::new(&ClientConfig::new("file:///tmp")),
            Err(RemoteError::InvalidBaseUrl { .. })
        ));
    }
}
