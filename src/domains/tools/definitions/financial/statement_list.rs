//! Periodic-report disclosure list tool.
//!
//! Lists the regular reports (business, half-year and quarterly) a company
//! filed within a date range, newest first, with a link to each filing in
//! the DART viewer.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use super::super::common::{
    error_result, parse_arguments, structured_result, to_http_response, validate_corp_code,
    validate_date_range,
};
use crate::domains::dart::Row;
use crate::domains::dart::reshape::reshape_disclosures;
use crate::domains::tools::ToolError;
use crate::domains::tools::context::ToolContext;

fn default_page() -> u32 {
    1
}

/// Parameters for the disclosure list tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StatementListParams {
    #[schemars(description = "8-digit DART corporation code (look it up with find_company_by_name)")]
    pub corp_code: String,

    #[schemars(description = "Search start date, YYYYMMDD")]
    pub start_date: String,

    #[schemars(description = "Search end date, YYYYMMDD (not before start_date)")]
    pub end_date: String,

    #[schemars(description = "Page number, 100 filings per page (default: 1)")]
    #[serde(default = "default_page")]
    pub page_no: u32,
}

/// Structured output of the disclosure list tool.
#[derive(Debug, Clone, Serialize)]
pub struct StatementListResult {
    pub corp_code: String,
    pub start_date: String,
    pub end_date: String,
    pub page_no: u64,
    pub total_count: u64,
    pub total_page: u64,
    pub disclosures: Vec<Row>,
}

/// Financial statement (periodic report) list tool.
pub struct StatementListTool;

impl StatementListTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_company_financial_statement_list";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List the periodic reports (business, half-year and quarterly reports) a company filed with DART between start_date and end_date (YYYYMMDD). Returns each filing's receipt number, report name, filing date, market class and a DART viewer URL, newest first, 100 per page.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(corp_code = %params.corp_code))]
    pub async fn execute(params: &StatementListParams, ctx: &ToolContext) -> CallToolResult {
        info!(
            "Disclosure list requested for {} to {}",
            params.start_date, params.end_date
        );

        match Self::run(params, ctx).await {
            Ok(result) => {
                let summary = format!(
                    "Found {} periodic report(s) for corp_code {} between {} and {} (page {} of {})",
                    result.total_count,
                    result.corp_code,
                    result.start_date,
                    result.end_date,
                    result.page_no,
                    result.total_page
                );
                structured_result(summary, result)
            }
            Err(e) => error_result(&format!("Disclosure list failed: {}", e)),
        }
    }

    async fn run(
        params: &StatementListParams,
        ctx: &ToolContext,
    ) -> Result<StatementListResult, ToolError> {
        let corp_code = validate_corp_code(&params.corp_code)?;
        let (start_date, end_date) = validate_date_range(&params.start_date, &params.end_date)?;
        if params.page_no == 0 {
            return Err(ToolError::invalid_arguments("page_no must be 1 or greater"));
        }
        ctx.require_api_key()?;

        let page = ctx
            .client
            .disclosure_list(&corp_code, &start_date, &end_date, params.page_no)
            .await?;

        Ok(StatementListResult {
            corp_code,
            start_date,
            end_date,
            page_no: page.page_no,
            total_count: page.total_count,
            total_page: page.total_page,
            disclosures: reshape_disclosures(page.rows),
        })
    }

    /// Registry handler (HTTP transport).
    pub async fn http_handler(arguments: Value, ctx: ToolContext) -> Result<Value, String> {
        let params: StatementListParams = parse_arguments(arguments)?;
        to_http_response(Self::execute(&params, &ctx).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<StatementListParams>(),
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
                let params: StatementListParams = serde_json::from_value(Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}
