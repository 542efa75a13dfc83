//! Tools domain module.
//!
//! Tools are the functions MCP clients call. Every DART tool validates its
//! arguments, makes its DART request(s) through the shared client and
//! reshapes the rows into grouped JSON.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `context.rs` - Shared client, config and corporation index
//! - `router.rs` - rmcp ToolRouter builder for the STDIO transport
//! - `registry.rs` - Tool listing and name-based dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/`
//! 2. Define params, `execute()` and `http_handler()`
//! 3. Export it in `definitions/mod.rs`
//! 4. Add its route in `router.rs` and its arm in `registry.rs`

pub mod context;
pub mod definitions;
mod error;
mod registry;
pub mod router;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::ToolContext;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
