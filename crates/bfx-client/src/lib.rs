//! # bfx-client — Typed client for the BlockFinaX dashboard API
//!
//! Provides typed async access to the REST resources the dashboard reads
//! and mutates:
//! - **Contracts** via `/api/contracts` (including approve / fund / release)
//! - **Documents** via `/api/documents`
//! - **Logistics** via `/api/logistics`
//! - **Risk assessment** via `/api/risk-assessment`
//!
//! ## Failure model
//!
//! Reads retry transport failures with backoff; mutations are sent once.
//! Concurrent mutations are not coordinated: two callers funding the same
//! contract race, and the backend's answer wins. Callers surface
//! [`ApiError::user_message()`] and refetch to reconcile.

pub mod config;
pub mod contracts;
pub mod documents;
pub mod error;
pub mod logistics;
pub(crate) mod response;
pub mod risk;

pub use config::{ClientConfig, ConfigError};
pub use contracts::{Contract, ContractClient, CreateContractRequest};
pub use documents::{CreateDocumentRequest, Document, DocumentClient};
pub use error::{ApiError, GENERIC_FAILURE_MESSAGE};
pub use logistics::{CreateShipmentRequest, LogisticsClient, Shipment};
pub use risk::{RiskAssessment, RiskAssessmentRequest, RiskClient, RiskFactor};

use std::time::Duration;

/// Top-level API client. Holds one sub-client per resource, all sharing a
/// single connection pool.
#[derive(Debug, Clone)]
pub struct BfxClient {
    contracts: ContractClient,
    documents: DocumentClient,
    logistics: LogisticsClient,
    risk: RiskClient,
}

impl BfxClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = config.api_token.as_ref() {
            let mut value =
                reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                    .map_err(|e| ConfigError::InvalidToken(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        tracing::debug!(base_url = %config.base_url, "API client ready");

        Ok(Self {
            contracts: ContractClient::new(http.clone(), config.base_url.clone()),
            documents: DocumentClient::new(http.clone(), config.base_url.clone()),
            logistics: LogisticsClient::new(http.clone(), config.base_url.clone()),
            risk: RiskClient::new(http, config.base_url),
        })
    }

    /// Access the contracts client.
    pub fn contracts(&self) -> &ContractClient {
        &self.contracts
    }

    /// Access the documents client.
    pub fn documents(&self) -> &DocumentClient {
        &self.documents
    }

    /// Access the logistics client.
    pub fn logistics(&self) -> &LogisticsClient {
        &self.logistics
    }

    /// Access the risk assessment client.
    pub fn risk(&self) -> &RiskClient {
        &self.risk
    }
}
