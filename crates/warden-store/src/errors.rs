//! Storage errors

use warden_core::WardenError;

/// Errors reported by a [`KvStore`](crate::KvStore) implementation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing store failed
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for WardenError {
    fn from(err: StoreError) -> Self {
        WardenError::storage(err.to_string())
    }
}

/// Result type for raw store operations
pub type StoreResult<T> = Result<T, StoreError>;
