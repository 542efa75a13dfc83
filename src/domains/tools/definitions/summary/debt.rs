//! Debt summary tool.
//!
//! Outstanding balances of corporate bonds, commercial paper, contingent and
//! new-type capital securities, short-term bonds, plus debt securities
//! issuance history.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use tracing::{info, instrument};

use super::super::common::{error_result, parse_arguments, structured_result, to_http_response};
use super::section::{SummaryParams, fetch_summary};
use crate::domains::dart::endpoints::DEBT_SECTIONS;
use crate::domains::tools::context::ToolContext;

/// Debt information summary tool.
pub struct DebtSummaryTool;

impl DebtSummaryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_debt_information_summary_details";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Summarize a company's debt from its regular report: outstanding corporate bonds, commercial paper, contingent capital securities, new-type capital securities, short-term bonds, and debt securities issuance. Sections without data come back as empty arrays.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(corp_code = %params.corp_code, bsns_year = %params.bsns_year))]
    pub async fn execute(params: &SummaryParams, ctx: &ToolContext) -> CallToolResult {
        info!("Debt summary requested");

        let request = match params.validate() {
            Ok(request) => request,
            Err(e) => return error_result(&e.to_string()),
        };

        match fetch_summary(ctx, DEBT_SECTIONS, &request).await {
            Ok(summary) => {
                structured_result(summary.headline("Debt information", &request), summary.body)
            }
            Err(e) => error_result(&format!("Debt summary failed: {}", e)),
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

    fn params(corp_code: &str) -> SummaryParams {
        SummaryParams {
            corp_code: corp_code.to_string(),
            bsns_year: "2023".to_string(),
            reprt_code: "11011".to_string(),
        }
    }

    #[tokio::test]
    async fn test_returns_documented_keys() {
        let server = MockServer::start().await;
        mount_rows(
            &server,
            "cprndNrdmpBlce",
            json!([{"rcept_no": "20240312000736", "corp_cls": "Y", "remndr_exprtn1": "공모", "sm": "1,000"}]),
        )
        .await;
        mount_rows(&server, "detScritsIsuAcmslt", json!([{"isu_cmpny": "삼성전자"}])).await;
        mount_no_data(&server).await;

        let ctx = test_context(&server, Some("test-key"));
        let result = DebtSummaryTool::execute(&params("00126380"), &ctx).await;
        assert!(!is_error(&result), "{}", first_text(&result));
        assert_eq!(
            structured_keys(&result),
            [
                "bsns_year",
                "commercial_paper_outstanding",
                "contingent_capital_securities_outstanding",
                "corp_code",
                "corporate_bonds_outstanding",
                "debt_securities_issuance",
                "new_capital_securities_outstanding",
                "reprt_code",
                "reprt_name",
                "short_term_bonds_outstanding",
            ]
        );

        let body = result.structured_content.as_ref().unwrap();
        let bond = &body["corporate_bonds_outstanding"][0];
        assert_eq!(bond["corp_cls_nm"], "유가증권");
        assert!(bond.get("rcept_no").is_none());
        assert!(first_text(&result).contains("2 of 6 sections"));
    }

    #[tokio::test]
    async fn test_invalid_corp_code_is_error() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;

        let ctx = test_context(&server, Some("test-key"));
        let result = DebtSummaryTool::execute(&params("abc"), &ctx).await;
        assert!(is_error(&result));
        assert!(result.structured_content.is_none());
    }

    #[tokio::test]
    async fn test_unknown_company_is_error() {
        let server = MockServer::start().await;
        mount_no_data(&server).await;

        let ctx = test_context(&server, Some("test-key"));
        let result = DebtSummaryTool::execute(&params("99999999"), &ctx).await;
        assert!(is_error(&result));
        assert!(first_text(&result).contains("013"));
    }

    #[tokio::test]
    async fn test_http_handler_rejects_missing_argument() {
        let server = MockServer::start().await;
        let ctx = test_context(&server, Some("test-key"));
        let err = DebtSummaryTool::http_handler(json!({"corp_code": "00126380"}), ctx)
            .await
            .unwrap_err();
        assert!(err.contains("bsns_year"));
    }
}
