//! Domain error types.

use entity_store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
///
/// The display text of `Validation` and `NotFound` is the message shown
/// to clients verbatim.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The request payload is malformed, incomplete, or inconsistent.
    #[error("{0}")]
    Validation(String),

    /// The referenced record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// An error occurred in the entity store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl DomainError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}
