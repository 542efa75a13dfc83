//! Tool-specific error types.

use thiserror::Error;

use crate::domains::dart::DartError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The DART request failed or DART reported an error status.
    #[error(transparent)]
    Dart(#[from] DartError),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Whether DART answered that it has no matching data.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::Dart(e) if e.is_no_data())
    }
}
