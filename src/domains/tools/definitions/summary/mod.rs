//! Regular-report summary tools.
//!
//! Each tool combines several DART regular-report endpoints into one answer.

pub mod debt;
pub mod investment;
pub mod people;
pub mod section;
pub mod stock;

pub use debt::DebtSummaryTool;
pub use investment::InvestmentSummaryTool;
pub use people::PeopleSummaryTool;
pub use section::SummaryParams;
pub use stock::StockSummaryTool;
