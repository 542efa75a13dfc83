//! Tool definitions module.
//!
//! Each tool lives in its own file and exposes the same surface:
//! `NAME`, `DESCRIPTION`, `execute()`, `http_handler()`, `to_tool()` and
//! `create_route()`.

pub mod common;
pub mod company;
pub mod financial;
pub mod summary;
pub mod today;

pub use company::{FindCompanyParams, FindCompanyTool};
pub use financial::{
    FinancialStatementParams, FinancialStatementTool, StatementListParams, StatementListTool,
};
pub use summary::{
    DebtSummaryTool, InvestmentSummaryTool, PeopleSummaryTool, StockSummaryTool, SummaryParams,
};
pub use today::{TodayParams, TodayTool};
