//! Inventory service: CRUD over the sweets table, addressed by row position.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
