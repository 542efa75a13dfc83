//! Personnel summary tool.
//!
//! Employees are grouped by business segment and gender; executives carry
//! Korean labels for their gender, registration and full-time flags.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use tracing::{info, instrument};

use super::super::common::{error_result, parse_arguments, structured_result, to_http_response};
use super::section::{SummaryParams, fetch_summary};
use crate::domains::dart::endpoints::PEOPLE_SECTIONS;
use crate::domains::tools::context::ToolContext;

/// Personnel and compensation summary tool.
pub struct PeopleSummaryTool;

impl PeopleSummaryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_people_information_summary_details";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Summarize a company's people from its regular report: employees grouped by business segment and gender with headcounts, executives, director and auditor compensation, unregistered executive compensation, outside director changes, and the five highest-paid individuals. Sections without data come back as empty arrays.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(corp_code = %params.corp_code, bsns_year = %params.bsns_year))]
    pub async fn execute(params: &SummaryParams, ctx: &ToolContext) -> CallToolResult {
        info!("People summary requested");

        let request = match params.validate() {
            Ok(request) => request,
            Err(e) => return error_result(&e.to_string()),
        };

        match fetch_summary(ctx, PEOPLE_SECTIONS, &request).await {
            Ok(summary) => {
                structured_result(summary.headline("People information", &request), summary.body)
            }
            Err(e) => error_result(&format!("People summary failed: {}", e)),
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
