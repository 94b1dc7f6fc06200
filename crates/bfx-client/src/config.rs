//! API client configuration.
//!
//! One base URL serves every resource (`/api/contracts`, `/api/documents`,
//! `/api/logistics`, `/api/risk-assessment`). Defaults target the local
//! development server; override via environment variables or explicit
//! construction.

use url::Url;
use zeroize::Zeroizing;

/// Default base URL of the dashboard API.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Configuration for connecting to the dashboard API.
///
/// Custom `Debug` implementation redacts the token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL; resource paths are appended to it.
    pub base_url: Url,
    /// Optional bearer token.
    pub api_token: Option<Zeroizing<String>>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Build a configuration for `base_url` with default settings.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("base_url", base_url)?,
            api_token: None,
            timeout_secs: 30,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `BFX_API_URL` (default: `http://localhost:5000`)
    /// - `BFX_API_TOKEN` (optional)
    /// - `BFX_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("BFX_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Ok(Self {
            base_url: parse_base_url("BFX_API_URL", &raw)?,
            api_token: std::env::var("BFX_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty())
                .map(Zeroizing::new),
            timeout_secs: std::env::var("BFX_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Configuration pointing at a local mock server (for testing).
    pub fn local(port: u16) -> Result<Self, ConfigError> {
        let mut cfg = Self::new(&format!("http://127.0.0.1:{port}"))?;
        cfg.timeout_secs = 5;
        Ok(cfg)
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Zeroizing::new(token.into()));
        self
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url("base_url", base_url)?;
        Ok(self)
    }
}

/// Parse a base URL, forcing a trailing slash so relative paths append
/// instead of replacing the last segment.
fn parse_base_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            source.to_string(),
            format!("{raw:?} cannot be a base URL"),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid bearer token: {0}")]
    InvalidToken(String),
}
