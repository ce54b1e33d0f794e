use thiserror::Error;

use crate::EntityId;

/// Errors that can occur when interacting with the entity store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same id is already stored.
    #[error("Duplicate id: {0}")]
    DuplicateId(EntityId),
}

/// Result type for entity store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
