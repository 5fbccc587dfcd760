use serde::Deserialize;
use serde_json::Value;

/// A row of the billing table, keyed by `billid`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub billid: u32,
    pub customer_name: String,
    pub date: String,
    pub amount: i64,
    pub sweet_name: String,
}

/// Payload for creating a bill.
///
/// `sweet_code` is the row position of the sweet being sold; `quantity`
/// is coerced to an integer by the billing service.
#[derive(Debug, Clone, Deserialize)]
pub struct BillRequest {
    pub sweet_code: i64,
    pub customer_name: String,
    pub date: String,
    pub quantity: Value,
}

impl BillRequest {
    #[cfg(test)]
    pub fn new(
        sweet_code: i64,
        customer_name: impl Into<String>,
        date: impl Into<String>,
        quantity: impl Into<Value>,
    ) -> Self {
        Self {
            sweet_code,
            customer_name: customer_name.into(),
            date: date.into(),
            quantity: quantity.into(),
        }
    }
}
