//! Remote page retrieval through a CORS-bypass proxy.
//!
//! Article URLs are not fetched directly: the target page is requested
//! through a third-party bridging endpoint that wraps the raw HTML in a JSON
//! envelope. The endpoint is injected at construction so deployments can
//! point at their own bridge; the public AllOrigins instance is only the
//! default. One request per invocation, no retry.
//!
//! # Failure Mapping
//!
//! - unparseable target URL, transport failure, or non-success status:
//!   [`ScanError::Network`]
//! - body that is not the expected JSON envelope, or an envelope without a
//!   `contents` field: [`ScanError::Content`]

use crate::error::ScanError;
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Public AllOrigins endpoint used when no override is configured.
pub const DEFAULT_PROXY_ENDPOINT: &str = "https://api.allorigins.win/get";

/// JSON envelope returned by the proxy. Only `contents` is consumed.
#[derive(Debug, Deserialize)]
struct ProxyEnvelope {
    contents: Option<String>,
}

/// Fetches pages through the configured bridging endpoint.
#[derive(Debug, Clone)]
pub struct ProxyFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl ProxyFetcher {
    /// Create a fetcher talking to the given bridging endpoint.
    ///
    /// The target URL is appended as a URL-encoded `url` query parameter on
    /// each request.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Retrieve the raw HTML of `url` through the proxy.
    ///
    /// # Arguments
    ///
    /// * `url` - The target page URL
    ///
    /// # Returns
    ///
    /// The page HTML from the envelope's `contents` field, or a
    /// [`ScanError`] describing the failure. No retry is attempted.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScanError> {
        let target = url::Url::parse(url)
            .map_err(|e| ScanError::Network(format!("invalid target URL: {e}")))?;
        let request_url = format!(
            "{}?url={}",
            self.endpoint,
            urlencoding::encode(target.as_str())
        );

        let response = self.client.get(&request_url).send().await.map_err(|e| {
            warn!(error = %e, "Proxy request failed");
            ScanError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Proxy returned non-success status");
            return Err(ScanError::Network(format!("proxy returned {status}")));
        }

        let envelope: ProxyEnvelope = response.json().await.map_err(|e| {
            warn!(error = %e, "Proxy response was not valid JSON");
            ScanError::Content("proxy response was not the expected JSON envelope".to_string())
        })?;

        let contents = envelope.contents.ok_or_else(|| {
            ScanError::Content("proxy response is missing the contents field".to_string())
        })?;

        info!(bytes = contents.len(), "Fetched page through proxy");
        Ok(contents)
    }
}

impl Default for ProxyFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_page_returns_envelope_contents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .and(query_param("url", "https://example.com/story"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "contents": "<html><body>ok</body></html>",
                "status": { "http_code": 200 }
            })))
            .mount(&server)
            .await;

        let fetcher = ProxyFetcher::new(format!("{}/get", server.uri()));
        let html = fetcher
            .fetch_page("https://example.com/story")
            .await
            .expect("fetch ok");
        assert_eq!(html, "<html><body>ok</body></html>");
    }

    #[tokio::test]
    async fn test_fetch_page_maps_http_status_to_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let fetcher = ProxyFetcher::new(format!("{}/get", server.uri()));
        let err = fetcher
            .fetch_page("https://example.com/story")
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Network(_)));
    }

    #[tokio::test]
    async fn test_fetch_page_maps_bad_json_to_content_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let fetcher = ProxyFetcher::new(format!("{}/get", server.uri()));
        let err = fetcher
            .fetch_page("https://example.com/story")
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Content(_)));
    }

    #[tokio::test]
    async fn test_fetch_page_requires_contents_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "status": { "http_code": 200 } })),
            )
            .mount(&server)
            .await;

        let fetcher = ProxyFetcher::new(format!("{}/get", server.uri()));
        let err = fetcher
            .fetch_page("https://example.com/story")
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Content(_)));
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_invalid_target_url() {
        let fetcher = ProxyFetcher::default();
        let err = fetcher.fetch_page("not a url").await.unwrap_err();
        assert!(matches!(err, ScanError::Network(_)));
        assert!(err.to_string().contains("invalid target URL"));
    }

    #[tokio::test]
    async fn test_fetch_page_maps_unreachable_proxy_to_network_error() {
        // Port 1 is never listening.
        let fetcher = ProxyFetcher::new("http://127.0.0.1:1/get");
        let err = fetcher
            .fetch_page("https://example.com/story")
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Network(_)));
    }
}
