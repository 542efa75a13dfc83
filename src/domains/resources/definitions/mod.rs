//! Resource definitions module.
//!
//! Each resource is defined in its own file with its URI, metadata and
//! content provider.
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

pub mod corp_classes;
pub mod report_codes;
pub mod server_info;
pub mod statement_divisions;

pub use corp_classes::CorpClassesResource;
pub use report_codes::ReportCodesResource;
pub use server_info::ServerInfoResource;
pub use statement_divisions::StatementDivisionsResource;

use super::service::ResourceContent;

/// Trait for resource definitions.
///
/// Each resource must implement this trait to provide its metadata and content.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Get the content for this resource.
    fn content() -> ResourceContent;
}

/// Render a JSON document as pretty-printed text.
fn pretty(value: serde_json::Value) -> String {
    format!("{:#}", value)
}
