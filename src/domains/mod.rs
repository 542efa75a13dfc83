//! Domains module containing business logic organized by bounded contexts.
//!
//! - **dart**: OpenDART API client, code tables, response reshaping and the
//!   local corporation index
//! - **tools**: MCP tools built on the DART domain
//! - **resources**: Read-only reference documents

pub mod dart;
pub mod resources;
pub mod tools;
