//! Shareholding and capital summary tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use tracing::{info, instrument};

use super::super::common::{error_result, parse_arguments, structured_result, to_http_response};
use super::section::{SummaryParams, fetch_summary};
use crate::domains::dart::endpoints::STOCK_SECTIONS;
use crate::domains::tools::context::ToolContext;

/// Stock information summary tool.
pub struct StockSummaryTool;

impl StockSummaryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_stock_information_summary_details";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Summarize a company's shares from its regular report: largest shareholders and changes among them, minority shareholders, dividends, capital increases and decreases, and treasury stock acquisitions and disposals. Sections without data come back as empty arrays.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(corp_code = %params.corp_code, bsns_year = %params.bsns_year))]
    pub async fn execute(params: &SummaryParams, ctx: &ToolContext) -> CallToolResult {
        info!("Stock summary requested");

        let request = match params.validate() {
            Ok(request) => request,
            Err(e) => return error_result(&e.to_string()),
        };

        match fetch_summary(ctx, STOCK_SECTIONS, &request).await {
            Ok(summary) => {
                structured_result(summary.headline("Stock information", &request), summary.body)
            }
            Err(e) => error_result(&format!("Stock summary failed: {}", e)),
        }
    }

    /// Registry handler (HTTP transport).
    pub async fn http_handler(
        arguments: serde_json::Value,
        ctx: ToolContext,
    ) -> Result<serde_json::Value, String> {
        let params: SummaryParams = parse_arguments(arguments)?;
        to_http_response(Self::execute(&params, &ctx).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SummaryParams>(),
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
        ToolRoute::new_dyn(Self::to_tool(), move |call: ToolCallContext<'_, S>| {
            let args = call.arguments.clone().unwrap_or_default();
            let ctx = ctx.clone();
            async move {
                let params: SummaryParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
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
    async fn test_returns_documented_keys() {
        let server = MockServer::start().await;
        mount_rows(
            &server,
            "alotMatter",
            json!([{"se": "주당 현금배당금(원)", "stock_knd": "보통주", "thstrm": "1,444"}]),
        )
        .await;
        mount_rows(&server, "hyslrSttus", json!([{"nm": "이재용", "relate": "본인"}])).await;
        mount_no_data(&server).await;

        let ctx = test_context(&server, Some("test-key"));
        let params = SummaryParams {
            corp_code: "00126380".to_string(),
            bsns_year: "2022".to_string(),
            reprt_code: "11011".to_string(),
        };
        let result = StockSummaryTool::execute(&params, &ctx).await;
        assert!(!is_error(&result), "{}", first_text(&result));
        assert_eq!(
            structured_keys(&result),
            [
                "bsns_year",
                "capital_changes",
                "corp_code",
                "dividends",
                "largest_shareholder_changes",
                "largest_shareholders",
                "minority_shareholders",
                "reprt_code",
                "reprt_name",
                "treasury_stock",
            ]
        );

        let body = result.structured_content.as_ref().unwrap();
        assert_eq!(body["dividends"][0]["thstrm"], "1,444");
        assert_eq!(body["largest_shareholders"][0]["nm"], "이재용");
        assert_eq!(body["treasury_stock"], json!([]));
    }

    #[tokio::test]
    async fn test_invalid_year_is_error() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;

        let ctx = test_context(&server, Some("test-key"));
        let params = SummaryParams {
            corp_code: "00126380".to_string(),
            bsns_year: "2010".to_string(),
            reprt_code: "11011".to_string(),
        };
        let result = StockSummaryTool::execute(&params, &ctx).await;
        assert!(is_error(&result));
        assert!(first_text(&result).contains("bsns_year"));
    }
}
