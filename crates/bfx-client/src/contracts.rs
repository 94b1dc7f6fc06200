//! Typed client for the contracts API.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/contracts` | List contracts |
//! | GET    | `/api/contracts/{id}` | Get by ID |
//! | POST   | `/api/contracts` | Create a draft |
//! | PATCH  | `/api/contracts/{id}` | Update status |
//!
//! Approve, fund and release are status updates. The client sends them
//! without checking the current status; the backend decides.

use serde::{Deserialize, Serialize};

use bfx_core::{ContractId, Timestamp};
use bfx_state::{ContractAction, ContractStatus, ContractView, MilestoneKey, MilestoneTimes};

use crate::error::ApiError;
use crate::response::{decode, fetch, fetch_optional, lenient_timestamp, transport, url_for};

// -- Wire types ----------------------------------------------------------------

/// A trade contract as returned by the API.
///
/// `status` is kept exactly as received; resolve it through [`Contract::view`].
/// Missing fields default so older records still decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: ContractId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub contract_number: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub buyer: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub commodity: Option<String>,
    /// Contract value. Numeric or string depending on the backend.
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub approved_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub funded_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub shipped_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub received_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub completed_at: Option<Timestamp>,
}

impl Contract {
    /// Milestone times recorded on the contract.
    pub fn milestone_times(&self) -> MilestoneTimes {
        [
            (MilestoneKey::Created, self.created_at),
            (MilestoneKey::Approved, self.approved_at),
            (MilestoneKey::Funded, self.funded_at),
            (MilestoneKey::Shipped, self.shipped_at),
            (MilestoneKey::Received, self.received_at),
            (MilestoneKey::Completed, self.completed_at),
        ]
        .into_iter()
        .filter_map(|(key, ts)| ts.map(|ts| (key, ts)))
        .collect()
    }

    /// Resolve the status into the rendered view.
    pub fn view(&self) -> ContractView {
        ContractView::resolve(&self.status, &self.milestone_times())
    }

    /// Value and currency for display (`125000 USD`), if a value is set.
    pub fn display_value(&self) -> Option<String> {
        let value = match self.value.as_ref()? {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => return None,
            other => other.to_string(),
        };
        Some(match &self.currency {
            Some(currency) => format!("{value} {currency}"),
            None => value,
        })
    }
}

/// Request to create a contract. New contracts start as `DRAFT`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commodity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ContractStatus,
}

impl CreateContractRequest {
    /// A draft with only a title.
    pub fn draft(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            buyer: None,
            seller: None,
            commodity: None,
            value: None,
            currency: None,
            description: None,
            status: ContractStatus::Draft,
        }
    }
}

/// Body of a status update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateStatusRequest {
    pub status: ContractStatus,
}

// -- Client ---------------------------------------------------------------------

/// Client for the contracts API.
#[derive(Debug, Clone)]
pub struct ContractClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl ContractClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// List all contracts.
    pub async fn list(&self) -> Result<Vec<Contract>, ApiError> {
        let endpoint = "GET /api/contracts";
        let url = url_for(&self.base_url, &["api", "contracts"])?;
        tracing::debug!(endpoint, "listing contracts");

        fetch(endpoint, || self.http.get(url.clone())).await
    }

    /// Get a contract by ID. A 404 is `Ok(None)`.
    pub async fn get(&self, id: &ContractId) -> Result<Option<Contract>, ApiError> {
        let endpoint = format!("GET /api/contracts/{}", id.as_str());
        let url = url_for(&self.base_url, &["api", "contracts", id.as_str()])?;
        tracing::debug!(%id, "fetching contract");

        fetch_optional(&endpoint, || self.http.get(url.clone())).await
    }

    /// Create a contract.
    pub async fn create(&self, req: &CreateContractRequest) -> Result<Contract, ApiError> {
        let endpoint = "POST /api/contracts";
        let url = url_for(&self.base_url, &["api", "contracts"])?;
        tracing::debug!(endpoint, title = %req.title, "creating contract");

        let resp = self
            .http
            .post(url)
            .json(req)
            .send()
            .await
            .map_err(transport(endpoint))?;
        decode(endpoint, resp).await
    }

    /// Set the contract status. Sent once; no legality check, no rollback.
    pub async fn update_status(
        &self,
        id: &ContractId,
        status: ContractStatus,
    ) -> Result<Contract, ApiError> {
        let endpoint = format!("PATCH /api/contracts/{}", id.as_str());
        let url = url_for(&self.base_url, &["api", "contracts", id.as_str()])?;
        tracing::info!(%id, %status, "updating contract status");

        let resp = self
            .http
            .patch(url)
            .json(&UpdateStatusRequest { status })
            .send()
            .await
            .map_err(transport(&endpoint))?;
        decode(&endpoint, resp).await
    }

    /// Send `action` as a status update to its target status.
    pub async fn apply(
        &self,
        id: &ContractId,
        action: ContractAction,
    ) -> Result<Contract, ApiError> {
        tracing::debug!(%id, %action, "applying contract action");
        self.update_status(id, action.target_status()).await
    }

    /// Approve a draft.
    pub async fn approve(&self, id: &ContractId) -> Result<Contract, ApiError> {
        self.apply(id, ContractAction::Approve).await
    }

    /// Fund the escrow.
    pub async fn fund(&self, id: &ContractId) -> Result<Contract, ApiError> {
        self.apply(id, ContractAction::Fund).await
    }

    /// Release escrowed funds.
    pub async fn release(&self, id: &ContractId) -> Result<Contract, ApiError> {
        self.apply(id, ContractAction::Release).await
    }
}
