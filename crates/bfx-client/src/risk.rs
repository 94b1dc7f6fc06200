//! Typed client for the risk assessment API.
//!
//! `POST /api/risk-assessment` scores a contract. The scoring model is the
//! backend's; this client only carries the request and the result.

use serde::{Deserialize, Serialize};

use bfx_core::ContractId;

use crate::error::ApiError;
use crate::response::{decode, transport, url_for};

/// Request for a risk assessment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentRequest {
    pub contract_id: ContractId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_country: Option<String>,
}

impl RiskAssessmentRequest {
    /// A request carrying only the contract.
    pub fn for_contract(contract_id: ContractId) -> Self {
        Self {
            contract_id,
            counterparty: None,
            origin_country: None,
            destination_country: None,
        }
    }
}

/// One contributing factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub name: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Assessment result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    #[serde(default)]
    pub contract_id: Option<ContractId>,
    /// Overall score, 0–100.
    #[serde(default)]
    pub score: Option<f64>,
    /// `low`, `medium`, `high`.
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub factors: Vec<RiskFactor>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Client for the risk assessment API.
#[derive(Debug, Clone)]
pub struct RiskClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl RiskClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Request an assessment.
    pub async fn assess(&self, req: &RiskAssessmentRequest) -> Result<RiskAssessment, ApiError> {
        let endpoint = "POST /api/risk-assessment";
        let url = url_for(&self.base_url, &["api", "risk-assessment"])?;
        tracing::debug!(contract = %req.contract_id, "requesting risk assessment");

        let resp = self
            .http
            .post(url)
            .json(req)
            .send()
            .await
            .map_err(transport(endpoint))?;
        decode(endpoint, resp).await
    }
}
