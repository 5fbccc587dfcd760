//! Billing service: prices a sale against the inventory and records the bill.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
