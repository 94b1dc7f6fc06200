//! End-to-end tests for the contract action handler against a wiremock API.

use bfx_cli::contract::run_action;
use bfx_cli::{AppContext, OutputFormat};
use bfx_client::{ClientConfig, GENERIC_FAILURE_MESSAGE};
use bfx_core::ContractId;
use bfx_state::ContractAction;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context(mock_server: &MockServer, format: OutputFormat) -> AppContext {
    AppContext::new(ClientConfig::new(&mock_server.uri()).unwrap(), format).unwrap()
}

fn contract(status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "c-1",
        "title": "Cocoa beans FOB Tema",
        "status": status
    })
}

#[tokio::test]
async fn release_sends_patch_and_prints_refetched_view() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contracts/c-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract("GOODSRECEIVED")))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/contracts/c-1"))
        .and(body_json(serde_json::json!({ "status": "COMPLETED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract("COMPLETED")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/contracts/c-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract("COMPLETED")))
        .mount(&mock_server)
        .await;

    let ctx = context(&mock_server, OutputFormat::Text);
    let id = ContractId::new("c-1").unwrap();
    let mut out = Vec::new();
    let code = run_action(&ctx, &id, ContractAction::Release, &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(code, 0);
    assert!(text.contains("Status:     Completed [green]"), "{text}");
    assert!(text.contains("Escrow:     Released"), "{text}");
}

#[tokio::test]
async fn action_is_sent_even_when_not_offered() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contracts/c-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract("DRAFT")))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/contracts/c-1"))
        .and(body_json(serde_json::json!({ "status": "FUNDED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract("FUNDED")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = context(&mock_server, OutputFormat::Text);
    let id = ContractId::new("c-1").unwrap();
    let mut out = Vec::new();
    let code = run_action(&ctx, &id, ContractAction::Fund, &mut out)
        .await
        .unwrap();
    assert_eq!(code, 0);
}

#[tokio::test]
async fn failed_action_prints_generic_message_and_current_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contracts/c-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract("PENDINGAPPROVAL")))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/contracts/c-1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = context(&mock_server, OutputFormat::Json);
    let id = ContractId::new("c-1").unwrap();
    let mut out = Vec::new();
    let code = run_action(&ctx, &id, ContractAction::Fund, &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(code, 1);
    assert!(text.starts_with(GENERIC_FAILURE_MESSAGE), "{text}");
    assert!(!text.contains("upstream unavailable"));
    assert!(text.contains("\"action\": \"fund\""), "{text}");
}

#[tokio::test]
async fn missing_contract_exits_nonzero_without_patch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contracts/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let ctx = context(&mock_server, OutputFormat::Text);
    let id = ContractId::new("nope").unwrap();
    let mut out = Vec::new();
    let code = run_action(&ctx, &id, ContractAction::Approve, &mut out)
        .await
        .unwrap();
    assert_eq!(code, 1);
    assert!(String::from_utf8(out).unwrap().contains("not found"));
}
