//! Resources domain module.
//!
//! Resources are read-only documents MCP clients can fetch: DART's code
//! tables, so an agent can pick valid `reprt_code`/`fs_div` values, and a
//! live server-info document.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `registry.rs` - Central resource registration
//! - `service.rs` - Resource service for listing and reading

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::{get_all_resources, resource_uris};
pub use service::{DynamicResourceType, ResourceContent, ResourceEntry, ResourceService};
