//! Application context shared by command handlers.

use bfx_client::{BfxClient, ClientConfig};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// State the handlers need: the API client and the output format.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub client: BfxClient,
    pub format: OutputFormat,
}

impl AppContext {
    /// Build from environment configuration, optionally overriding the
    /// base URL.
    pub fn from_env(api_url: Option<&str>, format: OutputFormat) -> anyhow::Result<Self> {
        let mut config = ClientConfig::from_env()?;
        if let Some(url) = api_url {
            config = config.with_base_url(url)?;
        }
        tracing::debug!(?config, "loaded client configuration");
        Self::new(config, format)
    }

    /// Build from an explicit configuration.
    pub fn new(config: ClientConfig, format: OutputFormat) -> anyhow::Result<Self> {
        Ok(Self {
            client: BfxClient::new(config)?,
            format,
        })
    }
}
