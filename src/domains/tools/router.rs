//! Tool Router - builds the rmcp ToolRouter for the STDIO transport.
//!
//! Each tool knows how to create its own route; this module only lists them.

use rmcp::handler::server::tool::ToolRouter;

use super::context::ToolContext;
use super::definitions::{
    DebtSummaryTool, FinancialStatementTool, FindCompanyTool, InvestmentSummaryTool,
    PeopleSummaryTool, StatementListTool, StockSummaryTool, TodayTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(ctx: ToolContext) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(FindCompanyTool::create_route(ctx.clone()))
        .with_route(StatementListTool::create_route(ctx.clone()))
        .with_route(FinancialStatementTool::create_route(ctx.clone()))
        .with_route(DebtSummaryTool::create_route(ctx.clone()))
        .with_route(InvestmentSummaryTool::create_route(ctx.clone()))
        .with_route(PeopleSummaryTool::create_route(ctx.clone()))
        .with_route(StockSummaryTool::create_route(ctx.clone()))
        .with_route(TodayTool::create_route(ctx))
}
