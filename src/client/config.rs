//! Immutable client configuration.
//!
//! Built once at startup and handed to [`HttpClient::new`](super::HttpClient::new);
//! nothing reads configuration from ambient state after that.

use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://apis.focsit.in";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400x300?text=No+Image";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Root prefixed to every relative path, stored without a trailing slash.
    pub base_url: String,
    /// Mount point of the REST API under `base_url`.
    pub api_prefix: String,
    /// Upper bound on a whole call: send, headers and body.
    pub timeout: Duration,
    /// Sent on every request unless a call overrides the same name.
    pub default_headers: BTreeMap<String, String>,
    /// Returned by image-URL resolution for empty paths.
    pub placeholder_image_url: String,
}

impl ClientConfig {
    /// Config rooted at `base_url` with every other field at its default.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base(base_url.into()),
            ..Self::default()
        }
    }

    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = normalize_prefix(prefix.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Replace the default header set wholesale.
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.default_headers = headers;
        self
    }

    pub fn with_placeholder_image_url(mut self, url: impl Into<String>) -> Self {
        self.placeholder_image_url = url.into();
        self
    }

    /// Re-apply the base URL and prefix normalization. The fields are public,
    /// so a struct literal can bypass the builder methods.
    pub(crate) fn normalized(mut self) -> Self {
        self.base_url = normalize_base(self.base_url);
        self.api_prefix = normalize_prefix(self.api_prefix);
        self
    }

    /// `api_prefix` joined with `endpoint`, e.g. `/api` + `/projects`.
    pub fn api_path(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_prefix, endpoint)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            default_headers: default_headers(),
            placeholder_image_url: DEFAULT_PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }
}

pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ])
}

fn normalize_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

/// Leading slash, no trailing slash; an empty or `/` prefix means "mounted at the root".
fn normalize_prefix(prefix: String) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
