//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] crate::domains::resources::ResourceError),

    /// Error talking to DART or the corporation index outside a tool call.
    #[error("DART error: {0}")]
    Dart(#[from] crate::domains::dart::DartError),

    /// The transport failed to start or stopped with an error.
    #[error("Transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::dart::DartError;
    use crate::domains::tools::ToolError;

    #[test]
    fn test_wraps_domain_errors() {
        let err: Error = ToolError::from(DartError::MissingApiKey).into();
        assert!(err.to_string().starts_with("Tool error: "));
        assert!(err.to_string().contains("DART_API_KEY"));

        let err: Error = crate::core::transport::TransportError::init("stdin closed").into();
        assert_eq!(
            err.to_string(),
            "Transport error: Server initialization error: stdin closed"
        );
    }
}
