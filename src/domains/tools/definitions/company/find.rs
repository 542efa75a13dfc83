//! Company lookup tool.
//!
//! Resolves a company name to DART's 8-digit `corp_code` using the local
//! corporation index. The index is filled from DART's registry the first
//! time it is needed, or again on request.

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
    default_limit, error_result, parse_arguments, structured_result, to_http_response,
    validate_limit,
};
use crate::domains::dart::CorpMatch;
use crate::domains::tools::ToolError;
use crate::domains::tools::context::ToolContext;

/// Parameters for the company lookup tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindCompanyParams {
    #[schemars(
        description = "Company name or part of it, in Korean as registered with DART (e.g. 삼성전자). SQL LIKE wildcards % and _ are honoured"
    )]
    pub corp_name: String,

    #[schemars(description = "Maximum number of companies to return (default: 10, max: 100)")]
    #[serde(default = "default_limit")]
    pub k: usize,

    #[schemars(description = "Re-download DART's corporation registry before searching")]
    #[serde(default)]
    pub refresh: bool,
}

/// Structured output of the company lookup tool.
#[derive(Debug, Clone, Serialize)]
pub struct FindCompanyResult {
    pub query: String,
    pub total_count: usize,
    pub companies: Vec<CorpMatch>,
}

/// Company lookup tool.
pub struct FindCompanyTool;

impl FindCompanyTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "find_company_by_name";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Find companies registered with DART by name and return their 8-digit corp_code, which every other DART tool requires. Matches are ranked by name similarity, listed companies first among equals. Each result includes corp_name, corp_eng_name, stock_code (empty for unlisted companies) and modify_date.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(corp_name = %params.corp_name, k = params.k))]
    pub async fn execute(params: &FindCompanyParams, ctx: &ToolContext) -> CallToolResult {
        info!("Company lookup requested");

        match Self::run(params, ctx).await {
            Ok(result) => {
                let summary = if result.companies.is_empty() {
                    format!("No companies found matching '{}'", result.query)
                } else {
                    format!(
                        "Found {} company(ies) matching '{}'",
                        result.total_count, result.query
                    )
                };
                structured_result(summary, result)
            }
            Err(e) => error_result(&format!("Company lookup failed: {}", e)),
        }
    }

    async fn run(
        params: &FindCompanyParams,
        ctx: &ToolContext,
    ) -> Result<FindCompanyResult, ToolError> {
        let query = params.corp_name.trim().to_string();
        if query.is_empty() {
            return Err(ToolError::invalid_arguments("corp_name must not be empty"));
        }
        let limit = validate_limit(params.k);
        ctx.require_api_key()?;

        if params.refresh {
            ctx.corp_index.sync(&ctx.client).await?;
        } else {
            ctx.corp_index.ensure_loaded(&ctx.client).await?;
        }

        let companies = ctx.corp_index.search_blocking(query.clone(), limit).await?;

        Ok(FindCompanyResult {
            query,
            total_count: companies.len(),
            companies,
        })
    }

    /// Registry handler (HTTP transport).
    pub async fn http_handler(arguments: Value, ctx: ToolContext) -> Result<Value, String> {
        let params: FindCompanyParams = parse_arguments(arguments)?;
        to_http_response(Self::execute(&params, &ctx).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FindCompanyParams>(),
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
                let params: FindCompanyParams = serde_json::from_value(Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}
