//! Helpers for tool tests against a mock DART server.

use std::sync::Arc;

use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::context::ToolContext;
use crate::core::config::Config;

/// Tool context pointed at `server`, with an in-memory corporation index.
pub(crate) fn test_context(server: &MockServer, api_key: Option<&str>) -> ToolContext {
    let mut config = Config::default();
    config.dart.base_url = format!("{}/api", server.uri());
    config.dart.api_key = api_key.map(str::to_string);
    ToolContext::new(Arc::new(config)).unwrap()
}

/// Serve `rows` from `/api/{endpoint}.json`.
pub(crate) async fn mount_rows(server: &MockServer, endpoint: &str, rows: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/{}.json", endpoint)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "000",
            "message": "정상",
            "list": rows
        })))
        .with_priority(1)
        .mount(server)
        .await;
}

/// Answer every otherwise unmatched request with DART's "no data" status.
pub(crate) async fn mount_no_data(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "013",
            "message": "조회된 데이타가 없습니다."
        })))
        .with_priority(10)
        .mount(server)
        .await;
}

/// Fail the test if any request reaches `server`.
pub(crate) async fn expect_no_requests(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

/// First text block of a result.
pub(crate) fn first_text(result: &CallToolResult) -> String {
    match result.content.first().map(|c| &c.raw) {
        Some(RawContent::Text(text)) => text.text.clone(),
        _ => String::new(),
    }
}

/// Top-level keys of the structured content, sorted.
pub(crate) fn structured_keys(result: &CallToolResult) -> Vec<String> {
    let mut keys: Vec<String> = result
        .structured_content
        .as_ref()
        .and_then(Value::as_object)
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default();
    keys.sort();
    keys
}

pub(crate) fn is_error(result: &CallToolResult) -> bool {
    result.is_error.unwrap_or(false)
}
