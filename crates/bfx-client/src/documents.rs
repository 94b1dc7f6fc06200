//! Typed client for the trade documents API.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/documents?contractId=` | List, optionally per contract |
//! | GET    | `/api/documents/{id}` | Get by ID |
//! | POST   | `/api/documents` | Register document metadata |
//!
//! File bytes are not handled here; only the metadata record.

use serde::{Deserialize, Serialize};

use bfx_core::{ContractId, DocumentId, Timestamp};

use crate::error::ApiError;
use crate::response::{decode, fetch, fetch_optional, lenient_timestamp, transport, url_for};

/// A trade document record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    #[serde(default)]
    pub contract_id: Option<ContractId>,
    #[serde(default)]
    pub name: String,
    /// Bill of lading, commercial invoice, certificate of origin, …
    #[serde(default, alias = "type")]
    pub document_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub uploaded_at: Option<Timestamp>,
}

/// Request to register a document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub contract_id: ContractId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Client for the documents API.
#[derive(Debug, Clone)]
pub struct DocumentClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl DocumentClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// List documents, optionally only those attached to `contract_id`.
    pub async fn list(&self, contract_id: Option<&ContractId>) -> Result<Vec<Document>, ApiError> {
        let endpoint = "GET /api/documents";
        let url = url_for(&self.base_url, &["api", "documents"])?;
        let query: Vec<(&str, &str)> = contract_id
            .map(|id| vec![("contractId", id.as_str())])
            .unwrap_or_default();

        fetch(endpoint, || self.http.get(url.clone()).query(&query)).await
    }

    /// Get a document by ID. A 404 is `Ok(None)`.
    pub async fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApiError> {
        let endpoint = format!("GET /api/documents/{}", id.as_str());
        let url = url_for(&self.base_url, &["api", "documents", id.as_str()])?;

        fetch_optional(&endpoint, || self.http.get(url.clone())).await
    }

    /// Register a document against a contract.
    pub async fn create(&self, req: &CreateDocumentRequest) -> Result<Document, ApiError> {
        let endpoint = "POST /api/documents";
        let url = url_for(&self.base_url, &["api", "documents"])?;
        tracing::debug!(contract = %req.contract_id, name = %req.name, "registering document");

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
