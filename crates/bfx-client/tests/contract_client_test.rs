//! Contract tests for ContractClient.
//!
//! A wiremock server stands in for the dashboard API. Request paths and
//! bodies are matched exactly as the dashboard sends them.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/api/contracts` | `list_contracts_*` |
//! | GET    | `/api/contracts/{id}` | `get_contract_*` |
//! | POST   | `/api/contracts` | `create_contract_*` |
//! | PATCH  | `/api/contracts/{id}` | `approve_*`, `fund_*`, `release_*`, `update_status_*` |
//!
//! Reads retry timeouts; status updates are sent exactly once.

use std::time::Duration;

use bfx_client::{ApiError, BfxClient, ClientConfig, CreateContractRequest, GENERIC_FAILURE_MESSAGE};
use bfx_core::ContractId;
use bfx_state::{ContractAction, ContractStatus, EscrowState};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> BfxClient {
    let config = ClientConfig::new(&mock_server.uri()).unwrap();
    BfxClient::new(config).unwrap()
}

fn contract_json(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": "Cocoa beans FOB Tema",
        "contractNumber": "BFX-2026-014",
        "status": status,
        "buyer": "Hamburg Foods GmbH",
        "seller": "Ashanti Cocoa Ltd",
        "value": 125000,
        "currency": "USD",
        "createdAt": "2026-02-01T09:00:00.000Z"
    })
}

// ── GET /api/contracts ───────────────────────────────────────────────

#[tokio::test]
async fn list_contracts_returns_all_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contracts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            contract_json("c-1", "DRAFT"),
            contract_json("c-2", "goodsReceived"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let contracts = client.contracts().list().await.unwrap();
    assert_eq!(contracts.len(), 2);
    assert_eq!(contracts[0].view().action, Some(ContractAction::Approve));
    assert_eq!(contracts[1].view().action, Some(ContractAction::Release));
    assert_eq!(contracts[1].status, "goodsReceived");
}

#[tokio::test]
async fn list_contracts_surfaces_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contracts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.contracts().list().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    match err {
        ApiError::Status { endpoint, body, .. } => {
            assert_eq!(endpoint, "GET /api/contracts");
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status, got: {other:?}"),
    }
}

#[tokio::test]
async fn list_contracts_rejects_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contracts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.contracts().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Deserialization { .. }), "{err:?}");
}

#[tokio::test]
async fn list_contracts_keeps_records_with_odd_timestamps() {
    let mock_server = MockServer::start().await;

    let mut seeded = contract_json("c-1", "FUNDED");
    seeded["createdAt"] = serde_json::json!("2024-01-15");
    seeded["fundedAt"] = serde_json::json!("not a date");

    Mock::given(method("GET"))
        .and(path("/api/contracts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([seeded, contract_json("c-2", "DRAFT")])),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let contracts = client.contracts().list().await.unwrap();
    assert_eq!(contracts.len(), 2);
    assert_eq!(
        contracts[0].created_at.map(|t| t.to_iso8601()).as_deref(),
        Some("2024-01-15T00:00:00Z")
    );
    assert!(contracts[0].funded_at.is_none());
    assert_eq!(contracts[0].view().escrow, Some(EscrowState::Held));
}

// ── GET /api/contracts/{id} ──────────────────────────────────────────

#[tokio::test]
async fn get_contract_resolves_completed_view() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contracts/c-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract_json("c-9", "COMPLETED")))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let id = ContractId::new("c-9").unwrap();
    let contract = client.contracts().get(&id).await.unwrap().unwrap();
    let view = contract.view();
    assert_eq!(view.status, Some(ContractStatus::Completed));
    assert_eq!(view.escrow, Some(EscrowState::Released));
    assert_eq!(view.completed_milestones(), view.milestones.len());
    assert_eq!(contract.display_value().as_deref(), Some("125000 USD"));
}

#[tokio::test]
async fn get_contract_returns_none_on_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contracts/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let id = ContractId::new("missing").unwrap();
    assert!(client.contracts().get(&id).await.unwrap().is_none());
}

// ── POST /api/contracts ──────────────────────────────────────────────

#[tokio::test]
async fn create_contract_posts_draft() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/contracts"))
        .and(body_json(serde_json::json!({
            "title": "Cashew kernels CIF Rotterdam",
            "status": "DRAFT"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(contract_json("c-new", "DRAFT")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let req = CreateContractRequest::draft("Cashew kernels CIF Rotterdam");
    let created = client.contracts().create(&req).await.unwrap();
    assert_eq!(created.id.as_str(), "c-new");
}

// ── PATCH /api/contracts/{id} ────────────────────────────────────────

#[tokio::test]
async fn approve_patches_pending_approval() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/contracts/c-1"))
        .and(body_json(serde_json::json!({ "status": "PENDINGAPPROVAL" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(contract_json("c-1", "PENDINGAPPROVAL")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let id = ContractId::new("c-1").unwrap();
    let updated = client.contracts().approve(&id).await.unwrap();
    assert_eq!(updated.view().action, Some(ContractAction::Fund));
}

#[tokio::test]
async fn fund_patches_funded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/contracts/c-1"))
        .and(body_json(serde_json::json!({ "status": "FUNDED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract_json("c-1", "FUNDED")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let id = ContractId::new("c-1").unwrap();
    let updated = client.contracts().fund(&id).await.unwrap();
    assert_eq!(updated.view().escrow, Some(EscrowState::Held));
}

#[tokio::test]
async fn release_patches_completed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/contracts/c-1"))
        .and(body_json(serde_json::json!({ "status": "COMPLETED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract_json("c-1", "COMPLETED")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let id = ContractId::new("c-1").unwrap();
    let updated = client.contracts().release(&id).await.unwrap();
    assert_eq!(updated.view().label, "Completed");
}

#[tokio::test]
async fn update_status_is_not_retried_on_rejection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/contracts/c-1"))
        .respond_with(ResponseTemplate::new(409).set_body_string("contract already funded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let id = ContractId::new("c-1").unwrap();
    let err = client
        .contracts()
        .update_status(&id, ContractStatus::Funded)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(409));
}

// ── Retries ──────────────────────────────────────────────────────────

fn impatient_client(mock_server: &MockServer) -> BfxClient {
    let mut config = ClientConfig::new(&mock_server.uri()).unwrap();
    config.timeout_secs = 1;
    BfxClient::new(config).unwrap()
}

#[tokio::test]
async fn get_contract_is_retried_after_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contracts/c-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(contract_json("c-1", "ACTIVE"))
                .set_delay(Duration::from_secs(3)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/contracts/c-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract_json("c-1", "ACTIVE")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = impatient_client(&mock_server);
    let id = ContractId::new("c-1").unwrap();
    let contract = client.contracts().get(&id).await.unwrap().unwrap();
    assert_eq!(contract.view().status, Some(ContractStatus::Active));
}

#[tokio::test]
async fn update_status_timeout_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/contracts/c-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(contract_json("c-1", "FUNDED"))
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = impatient_client(&mock_server);
    let id = ContractId::new("c-1").unwrap();
    let err = client.contracts().fund(&id).await.unwrap_err();
    assert!(matches!(err, ApiError::Http { .. }), "{err:?}");
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contracts"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new(&mock_server.uri())
        .unwrap()
        .with_token("test-token");
    let client = BfxClient::new(config).unwrap();
    assert!(client.contracts().list().await.unwrap().is_empty());
}
