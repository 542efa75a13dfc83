pub mod find;

pub use find::{FindCompanyParams, FindCompanyTool};
