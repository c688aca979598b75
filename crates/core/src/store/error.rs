//! Storage errors.

use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend failed (connection, query, serialization).
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A write conflicted with existing data, e.g. a duplicate ID.
    #[error("Storage conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    /// Wraps any displayable backend error.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}
