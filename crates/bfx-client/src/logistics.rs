//! Typed client for the logistics (shipment tracking) API.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/logistics?contractId=` | List shipments |
//! | GET    | `/api/logistics/{id}` | Get by ID |
//! | POST   | `/api/logistics` | Create shipment |
//! | PATCH  | `/api/logistics/{id}` | Update shipment status |
//!
//! Shipment status is free text owned by the carrier integration
//! (`in_transit`, `customs`, `delivered`, …) and is passed through as-is.

use serde::{Deserialize, Serialize};

use bfx_core::{ContractId, ShipmentId, Timestamp};

use crate::error::ApiError;
use crate::response::{decode, fetch, fetch_optional, lenient_timestamp, transport, url_for};

/// A shipment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: ShipmentId,
    #[serde(default)]
    pub contract_id: Option<ContractId>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub estimated_arrival: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl Shipment {
    /// `origin → destination`, with `?` for unknown ends.
    pub fn route(&self) -> String {
        format!(
            "{} → {}",
            self.origin.as_deref().unwrap_or("?"),
            self.destination.as_deref().unwrap_or("?")
        )
    }
}

/// Request to create a shipment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentRequest {
    pub contract_id: ContractId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_arrival: Option<Timestamp>,
}

#[derive(Debug, Serialize)]
struct ShipmentStatusUpdate<'a> {
    status: &'a str,
}

/// Client for the logistics API.
#[derive(Debug, Clone)]
pub struct LogisticsClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl LogisticsClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// List shipments, optionally only those for `contract_id`.
    pub async fn list(&self, contract_id: Option<&ContractId>) -> Result<Vec<Shipment>, ApiError> {
        let endpoint = "GET /api/logistics";
        let url = url_for(&self.base_url, &["api", "logistics"])?;
        let query: Vec<(&str, &str)> = contract_id
            .map(|id| vec![("contractId", id.as_str())])
            .unwrap_or_default();

        fetch(endpoint, || self.http.get(url.clone()).query(&query)).await
    }

    /// Get a shipment by ID. A 404 is `Ok(None)`.
    pub async fn get(&self, id: &ShipmentId) -> Result<Option<Shipment>, ApiError> {
        let endpoint = format!("GET /api/logistics/{}", id.as_str());
        let url = url_for(&self.base_url, &["api", "logistics", id.as_str()])?;

        fetch_optional(&endpoint, || self.http.get(url.clone())).await
    }

    /// Create a shipment.
    pub async fn create(&self, req: &CreateShipmentRequest) -> Result<Shipment, ApiError> {
        let endpoint = "POST /api/logistics";
        let url = url_for(&self.base_url, &["api", "logistics"])?;
        tracing::debug!(contract = %req.contract_id, "creating shipment");

        let resp = self
            .http
            .post(url)
            .json(req)
            .send()
            .await
            .map_err(transport(endpoint))?;
        decode(endpoint, resp).await
    }

    /// Update the shipment status. Sent once.
    pub async fn update_status(&self, id: &ShipmentId, status: &str) -> Result<Shipment, ApiError> {
        let endpoint = format!("PATCH /api/logistics/{}", id.as_str());
        let url = url_for(&self.base_url, &["api", "logistics", id.as_str()])?;
        tracing::info!(%id, status, "updating shipment status");

        let resp = self
            .http
            .patch(url)
            .json(&ShipmentStatusUpdate { status })
            .send()
            .await
            .map_err(transport(&endpoint))?;
        decode(&endpoint, resp).await
    }
}
