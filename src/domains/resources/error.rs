//! Resource-specific error types.

use thiserror::Error;

use crate::domains::dart::DartError;

/// Errors that can occur during resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Reading live state (the corporation index) failed.
    #[error(transparent)]
    Dart(#[from] DartError),
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }
}
