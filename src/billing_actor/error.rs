use thiserror::Error;

/// Errors that can occur while creating bills.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BillingError {
    #[error("Sweet not found: {0}")]
    SweetNotFound(i64),
    #[error("Inventory lookup failed: {0}")]
    InventoryUnavailable(String),
    #[error("Bill validation error: {0}")]
    ValidationError(String),
    #[error("Billing storage error: {0}")]
    StorageError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
