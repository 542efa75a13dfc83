//! Financial statement tools.

pub mod statement;
pub mod statement_list;

pub use statement::{FinancialStatementParams, FinancialStatementTool};
pub use statement_list::{StatementListParams, StatementListTool};
