//! Generic REST client: base URL, default headers, per-call options,
//! a timeout race and uniform error surfacing.
//!
//! [`HttpClient`] is constructed once from an immutable [`ClientConfig`] and
//! cloned freely; clones share the `reqwest` connection pool and the
//! cancellation token.

pub mod config;
pub mod error;
pub mod request;

use std::sync::Arc;

use reqwest::Client;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

pub use config::ClientConfig;
pub use error::{ClientError, ErrorKind};
pub use request::{Method, RequestOptions};

use request::{merge_headers, resolve_url, to_header_map};

/// Outcome of a single call: the parsed JSON body, or a classified error.
pub type ApiResult = Result<Value, ClientError>;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: Arc<ClientConfig>,
    default_headers: HeaderMap,
    cancel: CancellationToken,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Self::with_cancellation(config, CancellationToken::new())
    }

    /// Build a client whose calls are also aborted when `parent` is cancelled.
    pub fn with_cancellation(config: ClientConfig, parent: CancellationToken) -> Result<Self, ClientError> {
        let config = config.normalized();
        if config.timeout.is_zero() {
            return Err(ClientError::InvalidRequest("timeout must be greater than zero".into()));
        }
        let default_headers = to_header_map(&config.default_headers)?;
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: Arc::new(config),
            default_headers,
            cancel: parent.child_token(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Abort every in-flight and future call on this client and its clones.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolve an image path against this client's base URL.
    pub fn image_url(&self, path: Option<&str>) -> String {
        crate::image::image_url(&self.config, path)
    }

    /// Issue one request and classify the outcome.
    ///
    /// The exchange is raced against the configured timeout and the client's
    /// cancellation token. Whichever settles first decides the result; the
    /// losing request future is dropped, which aborts the connection.
    pub async fn call(&self, path: &str, options: RequestOptions) -> ApiResult {
        let url = resolve_url(&self.config.base_url, path);
        let method = options.method;

        let headers = match merge_headers(&self.default_headers, &options.headers) {
            Ok(h) => h,
            Err(e) => {
                warn!(%method, %url, error = %e, "request rejected before sending");
                return Err(e);
            }
        };

        debug!(
            %method,
            %url,
            body_len = options.body.as_ref().map_or(0, String::len),
            "sending request"
        );

        let result = tokio::select! {
            biased;

            _ = self.cancel.cancelled() => Err(ClientError::cancelled()),

            outcome = tokio::time::timeout(
                self.config.timeout,
                self.exchange(method, &url, headers, options.body),
            ) => outcome.unwrap_or_else(|_| Err(ClientError::timeout())),
        };

        match &result {
            Ok(_) => debug!(%method, %url, "request succeeded"),
            Err(e) => warn!(
                %method,
                %url,
                kind = ?e.kind(),
                status = ?e.status(),
                error = %e,
                "request failed"
            ),
        }
        result
    }

    async fn exchange(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> ApiResult {
        let mut req = self.client.request(method.into(), url).headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_builder() {
                ClientError::InvalidRequest(format!("invalid request for {url}: {e}"))
            } else {
                ClientError::Network(format!("request to {url} failed: {e}"))
            }
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(format!("failed to read response body: {e}")))?;

        let data: Value = serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(format!(
                "invalid JSON in response (HTTP {}): {e}",
                status.as_u16()
            ))
        })?;

        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(status = status.as_u16(), body = %data, "full response payload");
        }

        if !status.is_success() {
            return Err(ClientError::from_status(status.as_u16(), &data));
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn zero_timeout_rejected() {
        let cfg = ClientConfig::new("http://127.0.0.1:1").with_timeout(Duration::ZERO);
        let err = HttpClient::new(cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn invalid_default_header_rejected() {
        let cfg = ClientConfig::new("http://127.0.0.1:1").with_header("bad header", "x");
        assert!(HttpClient::new(cfg).is_err());
    }

    #[test]
    fn struct_literal_config_is_normalized() {
        let cfg = ClientConfig {
            base_url: "http://portal.test//".into(),
            api_prefix: "/api/".into(),
            ..ClientConfig::default()
        };
        let client = HttpClient::new(cfg).unwrap();
        assert_eq!(client.config().base_url, "http://portal.test");
        assert_eq!(client.config().api_path("/events"), "/api/events");
    }

    #[test]
    fn parent_token_cancels_client() {
        let parent = CancellationToken::new();
        let client = HttpClient::with_cancellation(ClientConfig::default(), parent.clone()).unwrap();
        assert!(!client.is_cancelled());
        parent.cancel();
        assert!(client.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_client_fails_without_network() {
        let client = HttpClient::new(ClientConfig::new("http://127.0.0.1:1")).unwrap();
        client.cancel();
        let err = client.call("/anything", RequestOptions::get()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }
}
