use thiserror::Error;

/// Errors that can occur during inventory operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    #[error("Sweet not found: {0}")]
    NotFound(usize),
    #[error("Sweet validation error: {0}")]
    ValidationError(String),
    #[error("Inventory storage error: {0}")]
    StorageError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
