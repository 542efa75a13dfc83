//! DART MCP Server Library
//!
//! A Model Context Protocol (MCP) server that exposes Korea's OpenDART
//! electronic disclosure API as tools: company lookup by name, periodic
//! report listings, full financial statements and regular-report summaries.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **dart**: HTTP client, code tables, reshaping and the corporation index
//!   - **tools**: MCP tools that can be executed by clients
//!   - **resources**: DART code tables and server info that clients can read
//!
//! # Example
//!
//! ```rust,no_run
//! use dart_mcp_server::{core::Config, core::McpServer, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = TransportService::new(config.transport.clone());
//!     let server = McpServer::new(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
