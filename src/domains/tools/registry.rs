//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - Name-based dispatch for tool calls (used by the HTTP transport)
//! - Tool metadata for listing

use rmcp::model::Tool;
use serde_json::Value;
use tracing::warn;

use super::context::ToolContext;
use super::error::ToolError;
use super::definitions::{
    DebtSummaryTool, FinancialStatementTool, FindCompanyTool, InvestmentSummaryTool,
    PeopleSummaryTool, StatementListTool, StockSummaryTool, TodayTool,
};

/// Tool registry - manages all available tools.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    ctx: ToolContext,
}

impl ToolRegistry {
    /// Create a new tool registry sharing `ctx` with every tool.
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            FindCompanyTool::NAME,
            StatementListTool::NAME,
            FinancialStatementTool::NAME,
            DebtSummaryTool::NAME,
            InvestmentSummaryTool::NAME,
            PeopleSummaryTool::NAME,
            StockSummaryTool::NAME,
            TodayTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// Both transports list tools from here or from the router built over
    /// the same definitions.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            FindCompanyTool::to_tool(),
            StatementListTool::to_tool(),
            FinancialStatementTool::to_tool(),
            DebtSummaryTool::to_tool(),
            InvestmentSummaryTool::to_tool(),
            PeopleSummaryTool::to_tool(),
            StockSummaryTool::to_tool(),
            TodayTool::to_tool(),
        ]
    }

    /// Dispatch a tool call by name.
    ///
    /// Tool failures come back as `Ok` with `isError` set in the result;
    /// `Err` is reserved for unknown tools and malformed arguments.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, String> {
        let ctx = self.ctx.clone();
        match name {
            FindCompanyTool::NAME => FindCompanyTool::http_handler(arguments, ctx).await,
            StatementListTool::NAME => StatementListTool::http_handler(arguments, ctx).await,
            FinancialStatementTool::NAME => {
                FinancialStatementTool::http_handler(arguments, ctx).await
            }
            DebtSummaryTool::NAME => DebtSummaryTool::http_handler(arguments, ctx).await,
            InvestmentSummaryTool::NAME => {
                InvestmentSummaryTool::http_handler(arguments, ctx).await
            }
            PeopleSummaryTool::NAME => PeopleSummaryTool::http_handler(arguments, ctx).await,
            StockSummaryTool::NAME => StockSummaryTool::http_handler(arguments, ctx).await,
            TodayTool::NAME => TodayTool::http_handler(arguments, ctx).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name).to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::test_support::*;
    use serde_json::json;
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_registry_tool_names() {
        let server = MockServer::start().await;
        let registry = ToolRegistry::new(test_context(&server, None));
        let names = registry.tool_names();
        assert_eq!(names.len(), 8);
        assert!(names.contains(&"find_company_by_name"));
        assert!(names.contains(&"get_company_financial_statement_list"));
        assert!(names.contains(&"get_financial_statement"));
        assert!(names.contains(&"get_debt_information_summary_details"));
        assert!(names.contains(&"get_investment_information_summary_details"));
        assert!(names.contains(&"get_people_information_summary_details"));
        assert!(names.contains(&"get_stock_information_summary_details"));
        assert!(names.contains(&"get_today"));
    }

    #[test]
    fn test_all_tools_have_object_schemas() {
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(tools.len(), 8);
        for tool in tools {
            assert_eq!(
                tool.input_schema.get("type"),
                Some(&json!("object")),
                "{}",
                tool.name
            );
            assert!(tool.description.is_some());
        }
    }

    #[tokio::test]
    async fn test_registry_call_today() {
        let server = MockServer::start().await;
        let registry = ToolRegistry::new(test_context(&server, None));
        let result = registry.call_tool("get_today", json!({})).await.unwrap();
        assert!(result["structuredContent"]["today"].is_string());
    }

    #[tokio::test]
    async fn test_registry_call_unknown() {
        let server = MockServer::start().await;
        let registry = ToolRegistry::new(test_context(&server, None));
        let result = registry.call_tool("unknown", json!({})).await;
        assert_eq!(result.unwrap_err(), "Tool not found: unknown");
    }

    #[tokio::test]
    async fn test_registry_rejects_malformed_arguments() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;
        let registry = ToolRegistry::new(test_context(&server, Some("test-key")));
        let result = registry
            .call_tool("get_financial_statement", json!({"corp_code": 126380}))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_every_dart_tool_requires_api_key() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;
        let registry = ToolRegistry::new(test_context(&server, None));

        let summary_args = json!({"corp_code": "00126380", "bsns_year": "2023", "reprt_code": "11011"});
        let calls = [
            (FindCompanyTool::NAME, json!({"corp_name": "삼성전자"})),
            (
                StatementListTool::NAME,
                json!({"corp_code": "00126380", "start_date": "20230101", "end_date": "20231231"}),
            ),
            (
                FinancialStatementTool::NAME,
                json!({"corp_code": "00126380", "bsns_year": "2023", "reprt_code": "11011", "fs_div": "CFS"}),
            ),
            (DebtSummaryTool::NAME, summary_args.clone()),
            (InvestmentSummaryTool::NAME, summary_args.clone()),
            (PeopleSummaryTool::NAME, summary_args.clone()),
            (StockSummaryTool::NAME, summary_args),
        ];
        assert_eq!(calls.len(), registry.tool_names().len() - 1);

        for (name, args) in calls {
            let result = registry.call_tool(name, args).await.unwrap();
            assert_eq!(result["isError"], true, "{}", name);
            let text = result["content"][0]["text"].as_str().unwrap_or_default();
            assert!(text.contains("DART_API_KEY"), "{}: {}", name, text);
        }
    }

    #[tokio::test]
    async fn test_registry_missing_key_is_error_result() {
        let server = MockServer::start().await;
        expect_no_requests(&server).await;
        let registry = ToolRegistry::new(test_context(&server, None));
        let result = registry
            .call_tool(
                "get_stock_information_summary_details",
                json!({"corp_code": "00126380", "bsns_year": "2023", "reprt_code": "11011"}),
            )
            .await
            .unwrap();
        assert_eq!(result["isError"], true);
    }
}
