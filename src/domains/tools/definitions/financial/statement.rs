//! Financial statement detail tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use super::super::common::{
    error_result, parse_arguments, parse_fs_div, parse_report_code, structured_result,
    to_http_response, validate_bsns_year, validate_corp_code,
};
use crate::domains::dart::reshape::group_financial_statement;
use crate::domains::tools::ToolError;
use crate::domains::tools::context::ToolContext;

/// Parameters for the financial statement tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FinancialStatementParams {
    #[schemars(description = "8-digit DART corporation code (look it up with find_company_by_name)")]
    pub corp_code: String,

    #[schemars(description = "Business year, 4 digits (2015 or later)")]
    pub bsns_year: String,

    #[schemars(
        description = "Report code: 11013 (Q1), 11012 (half-year), 11014 (Q3), 11011 (annual business report)"
    )]
    pub reprt_code: String,

    #[schemars(description = "OFS for separate statements, CFS for consolidated statements")]
    pub fs_div: String,
}

/// Financial statement detail tool.
pub struct FinancialStatementTool;

impl FinancialStatementTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_financial_statement";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Fetch every account of a company's financial statements for one report (fnlttSinglAcntAll), grouped into balance_sheet, income_statement, comprehensive_income_statement, cash_flow_statement and statement_of_changes_in_equity, each ordered as DART presents it. fs_div selects separate (OFS) or consolidated (CFS) statements.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(corp_code = %params.corp_code, bsns_year = %params.bsns_year))]
    pub async fn execute(params: &FinancialStatementParams, ctx: &ToolContext) -> CallToolResult {
        info!("Financial statement requested");

        match Self::run(params, ctx).await {
            Ok((summary, body)) => structured_result(summary, body),
            Err(e) => error_result(&format!("Financial statement failed: {}", e)),
        }
    }

    async fn run(
        params: &FinancialStatementParams,
        ctx: &ToolContext,
    ) -> Result<(String, Map<String, Value>), ToolError> {
        let corp_code = validate_corp_code(&params.corp_code)?;
        let bsns_year = validate_bsns_year(&params.bsns_year)?;
        let reprt_code = parse_report_code(&params.reprt_code)?;
        let fs_div = parse_fs_div(&params.fs_div)?;
        ctx.require_api_key()?;

        let rows = ctx
            .client
            .financial_statement(&corp_code, &bsns_year, reprt_code, fs_div)
            .await?;
        let row_count = rows.len();

        let mut body = Map::new();
        body.insert("corp_code".to_string(), Value::from(corp_code.clone()));
        body.insert("bsns_year".to_string(), Value::from(bsns_year.clone()));
        body.insert("reprt_code".to_string(), Value::from(reprt_code.code()));
        body.insert("reprt_name".to_string(), Value::from(reprt_code.korean_name()));
        body.insert("fs_div".to_string(), Value::from(fs_div.code()));
        body.insert("fs_name".to_string(), Value::from(fs_div.korean_name()));
        body.extend(group_financial_statement(rows, reprt_code));

        let summary = format!(
            "{} account(s) in the {} {} of corp_code {} for {}",
            row_count,
            reprt_code.korean_name(),
            fs_div.korean_name(),
            corp_code,
            bsns_year
        );
        Ok((summary, body))
    }

    /// Registry handler (HTTP transport).
    pub async fn http_handler(arguments: Value, ctx: ToolContext) -> Result<Value, String> {
        let params: FinancialStatementParams = parse_arguments(arguments)?;
        to_http_response(Self::execute(&params, &ctx).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FinancialStatementParams>(),
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
                let params: FinancialStatementParams = serde_json::from_value(Value::Object(args))
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
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params(corp_code: &str, fs_div: &str) -> FinancialStatementParams {
        FinancialStatementParams {
            corp_code: corp_code.to_string(),
            bsns_year: "2023".to_string(),
            reprt_code: "11011".to_string(),
            fs_div: fs_div.to_string(),
        }
    }

    #[tokio::test]
    async fn test_returns_documented_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/fnlttSinglAcntAll.json"))
            .and(query_param("fs_div", "CFS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "000",
                "message": "정상",
                "list": [
                    {"rcept_no": "20240312000736", "reprt_code": "11011", "bsns_year": "2023",
                     "corp_code": "00126380", "sj_div": "IS", "sj_nm": "손익계산서",
                     "account_id": "ifrs-full_Revenue", "account_nm": "수익(매출액)",
                     "thstrm_amount": "258935494000000", "ord": "1"},
                    {"rcept_no": "20240312000736", "reprt_code": "11011", "bsns_year": "2023",
                     "corp_code": "00126380", "sj_div": "BS", "sj_nm": "재무상태표",
                     "account_id": "ifrs-full_CurrentAssets", "account_nm": "유동자산",
                     "thstrm_amount": "195936557000000", "ord": "1"}
                ]
            })))
            .mount(&server)
            .await;

        let ctx = test_context(&server, Some("test-key"));
        let result = FinancialStatementTool::execute(&params("00126380", "cfs"), &ctx).await;
        assert!(!is_error(&result), "{}", first_text(&result));
        assert_eq!(
            structured_keys(&result),
            [
                "balance_sheet",
                "bsns_year",
                "cash_flow_statement",
                "comprehensive_income_statement",
                "corp_code",
                "fs_div",
                "fs_name",
                "income_statement",
                "other_statements",
                "reprt_code",
                "reprt_name",
                "statement_of_changes_in_equity",
            ]
        );

        let body = result.structured_content.as_ref().unwrap();
        assert_eq!(body["fs_div"], "CFS");
        assert_eq!(body["fs_name"], "연결재무제표");
        let revenue = &body["income_statement"][0];
        assert_eq!(revenue["account_nm"], "수익(매출액)");
        assert_eq!(revenue["sj_div_name_kr"], "손익계산서");
        assert_eq!(revenue["reprt_name_kr"], "사업보고서");
        assert!(revenue.get("rcept_no").is_none());
        assert!(revenue.get("sj_div").is_none());
        assert_eq!(body["cash_flow_statement"], json!([]));
    }

    #[tokio::test]
    async fn test_invalid_fs_div_is_error() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;

        let ctx = test_context(&server, Some("test-key"));
        let result = FinancialStatementTool::execute(&params("00126380", "XYZ"), &ctx).await;
        assert!(is_error(&result));
        assert!(first_text(&result).contains("fs_div"));
    }

    #[tokio::test]
    async fn test_missing_corp_code_is_error() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;

        let ctx = test_context(&server, Some("test-key"));
        let result = FinancialStatementTool::execute(&params("", "OFS"), &ctx).await;
        assert!(is_error(&result));
        assert!(result.structured_content.is_none());
    }

    #[tokio::test]
    async fn test_missing_api_key_sends_nothing() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;

        let ctx = test_context(&server, None);
        let result = FinancialStatementTool::execute(&params("00126380", "OFS"), &ctx).await;
        assert!(is_error(&result));
        assert!(first_text(&result).contains("DART_API_KEY"));
    }

    #[tokio::test]
    async fn test_no_data_is_error() {
        let server = MockServer::start().await;
        mount_no_data(&server).await;

        let ctx = test_context(&server, Some("test-key"));
        let result = FinancialStatementTool::execute(&params("00126380", "OFS"), &ctx).await;
        assert!(is_error(&result));
        assert!(first_text(&result).contains("013"));
    }
}
