//! Cloneable handles for talking to the service actors.

mod macros;

pub mod billing_client;
pub mod inventory_client;

pub use billing_client::BillingClient;
pub use inventory_client::InventoryClient;
