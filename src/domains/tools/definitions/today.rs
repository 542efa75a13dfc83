//! Current date tool.
//!
//! Lets a client anchor relative requests ("filings from the last year")
//! to the server's local calendar date before calling the DART tools.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::common::{parse_arguments, structured_result, to_http_response, today_yyyymmdd};
use crate::domains::tools::context::ToolContext;

/// The tool takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct TodayParams {}

#[derive(Debug, Clone, Serialize)]
pub struct TodayResult {
    pub today: String,
}

/// Current date tool.
pub struct TodayTool;

impl TodayTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_today";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Return today's date as YYYYMMDD in the server's local time zone. Use it to build start_date/end_date ranges and to pick a valid bsns_year.";

    pub async fn execute(_params: &TodayParams, _ctx: &ToolContext) -> CallToolResult {
        let today = today_yyyymmdd();
        debug!("Today is {}", today);
        structured_result(format!("Today is {}", today), TodayResult { today })
    }

    /// Registry handler (HTTP transport).
    pub async fn http_handler(arguments: Value, ctx: ToolContext) -> Result<Value, String> {
        let params: TodayParams = parse_arguments(arguments)?;
        to_http_response(Self::execute(&params, &ctx).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<TodayParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the rmcp router.
    pub fn create_route<S>(ctx: ToolContext) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |_call: ToolCallContext<'_, S>| {
            let ctx = ctx.clone();
            async move { Ok(Self::execute(&TodayParams::default(), &ctx).await) }.boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::test_support::*;
    use serde_json::json;
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_returns_eight_digit_date_without_api_key() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;

        let ctx = test_context(&server, None);
        let result = TodayTool::execute(&TodayParams::default(), &ctx).await;
        assert!(!is_error(&result));
        assert_eq!(structured_keys(&result), ["today"]);

        let today = result.structured_content.as_ref().unwrap()["today"]
            .as_str()
            .unwrap()
            .to_string();
        assert_eq!(today.len(), 8);
        assert!(today.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_http_handler_accepts_null_arguments() {
        let server = MockServer::start().await;
        let ctx = test_context(&server, None);
        let value = TodayTool::http_handler(Value::Null, ctx).await.unwrap();
        assert!(value.is_object());

        let ctx = test_context(&server, None);
        assert!(TodayTool::http_handler(json!({}), ctx).await.is_ok());
    }
}
