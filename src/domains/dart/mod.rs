//! OpenDART access: HTTP client, code tables, response reshaping and the
//! local corporation code index.

pub mod client;
pub mod codes;
pub mod corp_code;
pub mod corp_index;
pub mod endpoints;
pub mod error;
pub mod reshape;

pub use client::{DEFAULT_BASE_URL, DartClient, DisclosurePage, Row};
pub use codes::{CorpClass, FsDiv, ReportCode, StatementDivision};
pub use corp_code::CorpRecord;
pub use corp_index::{CorpIndex, CorpMatch};
pub use error::{DartError, DartResult};
