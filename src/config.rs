//! Configuration loading with env-var overrides.
//!
//! Reads a TOML file (default `config/default.toml` relative to the current
//! working directory), then applies `PORTAL_BASE_URL` and `PORTAL_LOG_LEVEL`.
//! When no path is given and the default file is absent, built-in defaults
//! are used.

use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::client::ClientConfig;
use crate::client::config::{
    DEFAULT_API_PREFIX, DEFAULT_BASE_URL, DEFAULT_PLACEHOLDER_IMAGE_URL, DEFAULT_TIMEOUT_MS,
    default_headers,
};
use crate::error::AppError;
use crate::logger;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Fully-resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub client: ClientConfig,
}

/// Env-sourced values that take precedence over the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides<'a> {
    pub base_url: Option<&'a str>,
    pub log_level: Option<&'a str>,
}

/// Raw TOML shape, the `serde` target before resolution.
#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    portal: RawPortal,
    #[serde(default)]
    client: RawClient,
}

#[derive(Deserialize)]
struct RawPortal {
    #[serde(default = "default_log_level")]
    log_level: String,
}

impl Default for RawPortal {
    fn default() -> Self {
        Self { log_level: default_log_level() }
    }
}

#[derive(Deserialize)]
struct RawClient {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_api_prefix")]
    api_prefix: String,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
    #[serde(default = "default_placeholder")]
    placeholder_image_url: String,
    /// `[client.headers]` replaces the built-in default header set.
    #[serde(default = "default_headers")]
    headers: BTreeMap<String, String>,
}

impl Default for RawClient {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            timeout_ms: default_timeout_ms(),
            placeholder_image_url: default_placeholder(),
            headers: default_headers(),
        }
    }
}

fn default_log_level() -> String { "warn".to_string() }
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_api_prefix() -> String { DEFAULT_API_PREFIX.to_string() }
fn default_timeout_ms() -> u64 { DEFAULT_TIMEOUT_MS }
fn default_placeholder() -> String { DEFAULT_PLACEHOLDER_IMAGE_URL.to_string() }

/// Load config from `path` (or the default location), then apply env overrides.
pub fn load(path: Option<&str>) -> Result<Config, AppError> {
    let base_url = env::var("PORTAL_BASE_URL").ok();
    let log_level = env::var("PORTAL_LOG_LEVEL").ok();
    let overrides = Overrides {
        base_url: base_url.as_deref(),
        log_level: log_level.as_deref(),
    };

    match path {
        Some(p) => load_from(&expand_home(p), overrides),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_from(default_path, overrides)
            } else {
                from_toml_str("", overrides)
            }
        }
    }
}

/// Internal loader - accepts an explicit path and overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(path: &Path, overrides: Overrides<'_>) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;
    resolve(parsed, overrides)
}

/// Resolve a TOML document into a [`Config`]. An empty document yields the defaults.
pub fn from_toml_str(raw: &str, overrides: Overrides<'_>) -> Result<Config, AppError> {
    let parsed: RawConfig =
        toml::from_str(raw).map_err(|e| AppError::Config(format!("parse error: {e}")))?;
    resolve(parsed, overrides)
}

fn resolve(parsed: RawConfig, overrides: Overrides<'_>) -> Result<Config, AppError> {
    let c = parsed.client;
    if c.timeout_ms == 0 {
        return Err(AppError::Config("client.timeout_ms must be greater than zero".into()));
    }
    let base_url = overrides.base_url.unwrap_or(&c.base_url);
    if base_url.trim().is_empty() {
        return Err(AppError::Config("client.base_url must not be empty".into()));
    }

    let client = ClientConfig::new(base_url)
        .with_api_prefix(c.api_prefix)
        .with_timeout(Duration::from_millis(c.timeout_ms))
        .with_headers(c.headers)
        .with_placeholder_image_url(c.placeholder_image_url);

    let log_level = overrides.log_level.unwrap_or(&parsed.portal.log_level).trim();
    logger::parse_level(log_level)
        .map_err(|e| AppError::Config(format!("portal.log_level: {e}")))?;

    Ok(Config {
        log_level: log_level.to_string(),
        client,
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_TOML: &str = r#"
[portal]
log_level = "debug"

[client]
base_url = "http://82.29.165.213:5000/"
api_prefix = "/api"
timeout_ms = 2500
placeholder_image_url = "/static/no-image.png"

[client.headers]
"Content-Type" = "application/json"
X-Portal = "admin"
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parse_full_config() {
        let f = write_toml(FULL_TOML);
        let cfg = load_from(f.path(), Overrides::default()).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.client.base_url, "http://82.29.165.213:5000");
        assert_eq!(cfg.client.timeout, Duration::from_millis(2500));
        assert_eq!(cfg.client.placeholder_image_url, "/static/no-image.png");
        assert_eq!(cfg.client.default_headers.len(), 2);
        assert_eq!(cfg.client.default_headers["X-Portal"], "admin");
    }

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = from_toml_str("", Overrides::default()).unwrap();
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.client, ClientConfig::default());
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = from_toml_str("[client]\ntimeout_ms = 0\n", Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("timeout_ms"));
    }

    #[test]
    fn env_overrides_win() {
        let f = write_toml(FULL_TOML);
        let overrides = Overrides {
            base_url: Some("http://localhost:5000"),
            log_level: Some("trace"),
        };
        let cfg = load_from(f.path(), overrides).unwrap();
        assert_eq!(cfg.client.base_url, "http://localhost:5000");
        assert_eq!(cfg.log_level, "trace");
    }

    #[test]
    fn invalid_log_level_rejected() {
        let err = from_toml_str("[portal]\nlog_level = \"verbos\"\n", Overrides::default())
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("log_level"));

        let overrides = Overrides { log_level: Some("loud"), ..Overrides::default() };
        assert!(from_toml_str("", overrides).is_err());

        let cfg = from_toml_str("[portal]\nlog_level = \"INFO\"\n", Overrides::default()).unwrap();
        assert_eq!(cfg.log_level, "INFO");
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(Path::new("/nonexistent/portal.toml"), Overrides::default());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
    }

    #[test]
    fn malformed_toml_errors() {
        let f = write_toml("[client\nbase_url = ");
        assert!(load_from(f.path(), Overrides::default()).is_err());
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let expanded = expand_home("~/.config/labs-portal.toml");
        assert!(expanded.starts_with(&home));
        assert_eq!(expand_home("/abs/portal.toml"), PathBuf::from("/abs/portal.toml"));
    }
}
