//! MCP wire behavior over a mock backend.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskbridge::backend::TaskApiClient;
use taskbridge::config::BridgeConfig;
use taskbridge::mcp::server::process_line;
use taskbridge::tools::ToolRegistry;

fn registry_for(uri: &str) -> ToolRegistry {
    let config = BridgeConfig::new(uri, "test-secret-key").with_timeout(Duration::from_secs(5));
    ToolRegistry::bridge(Arc::new(TaskApiClient::new(&config).unwrap()))
}

#[tokio::test]
async fn tools_call_returns_text_content_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let registry = registry_for(&server.uri());
    let line = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {"name": "list_users", "arguments": {}},
    })
    .to_string();

    let resp = process_line(&registry, &line).await.unwrap();
    let v: serde_json::Value = serde_json::from_str(&resp).unwrap();
    assert_eq!(v["result"]["content"][0]["type"], "text");
    assert_eq!(
        v["result"]["content"][0]["text"],
        "No users found in the system."
    );
    assert!(v["result"]["isError"].is_null());
}

#[tokio::test]
async fn tools_call_transport_failure_is_sanitized_is_error_content() {
    let registry = registry_for("http://127.0.0.1:1");
    let line = json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/call",
        "params": {"name": "list_tasks", "arguments": {}},
    })
    .to_string();

    let resp = process_line(&registry, &line).await.unwrap();
    let v: serde_json::Value = serde_json::from_str(&resp).unwrap();
    assert_eq!(v["result"]["isError"], true);
    let text = v["result"]["content"][0]["text"].as_str().unwrap();
    assert_eq!(
        text,
        "The backend service could not be reached. Please try again later."
    );
    // No JSON-RPC error frame: the transport stays healthy.
    assert!(v["error"].is_null());
}

#[tokio::test]
async fn tools_call_unknown_tool_is_an_invalid_request_error() {
    let registry = registry_for("http://127.0.0.1:1");
    let line = json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "tools/call",
        "params": {"name": "delete_everything", "arguments": {}},
    })
    .to_string();

    let resp = process_line(&registry, &line).await.unwrap();
    let v: serde_json::Value = serde_json::from_str(&resp).unwrap();
    assert_eq!(v["error"]["code"], -32600);
    assert!(v["error"]["message"]
        .as_str()
        .unwrap()
        .contains("delete_everything"));
    assert!(v["result"].is_null());
}

#[tokio::test]
async fn tools_list_schemas_carry_declared_constraints() {
    let registry = registry_for("http://127.0.0.1:1");
    let line = r#"{"jsonrpc":"2.0","id":4,"method":"tools/list","params":{}}"#;

    let resp = process_line(&registry, line).await.unwrap();
    let v: serde_json::Value = serde_json::from_str(&resp).unwrap();
    let tools = v["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 9);

    let schedule_call = tools
        .iter()
        .find(|t| t["name"] == "schedule_call")
        .unwrap();
    let duration = &schedule_call["inputSchema"]["properties"]["duration_minutes"];
    assert_eq!(duration["minimum"], 15);
    assert_eq!(duration["maximum"], 240);

    let update_task = tools
        .iter()
        .find(|t| t["name"] == "update_task_status")
        .unwrap();
    let statuses = update_task["inputSchema"]["properties"]["status"]["enum"]
        .as_array()
        .unwrap();
    assert_eq!(statuses.len(), 4);
}

#[tokio::test]
async fn full_session_initialize_then_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let registry = registry_for(&server.uri());

    let init = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#;
    let resp = process_line(&registry, init).await.unwrap();
    let v: serde_json::Value = serde_json::from_str(&resp).unwrap();
    assert_eq!(v["result"]["serverInfo"]["name"], "taskbridge");

    let note = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
    assert!(process_line(&registry, note).await.is_none());

    let call = json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/call",
        "params": {"name": "list_users", "arguments": {}},
    })
    .to_string();
    let resp = process_line(&registry, &call).await.unwrap();
    let v: serde_json::Value = serde_json::from_str(&resp).unwrap();
    assert_eq!(v["id"], 2);
    assert!(v["result"]["content"].is_array());
}
