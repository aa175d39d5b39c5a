//! Unified error handling for admin.

use thiserror::Error;

use crate::services::validation::ValidationErrors;
use crate::storage::StorageError;

/// Application-level error type for admin operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation; nothing was changed.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Reading or writing the key-value store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether the caller can fix the error by changing its input.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}
