use tokio::sync::mpsc;

use super::macros::{client_method, client_shutdown};
use crate::billing_actor::BillingError;
use crate::domain::BillRequest;
use crate::messages::BillingRequest;

/// Client for the billing service.
#[derive(Clone)]
pub struct BillingClient {
    sender: mpsc::Sender<BillingRequest>,
}

impl BillingClient {
    pub fn new(sender: mpsc::Sender<BillingRequest>) -> Self {
        Self { sender }
    }
}

client_shutdown!(BillingClient, BillingRequest);

client_method!(BillingClient => fn create_bill(request: BillRequest) -> i64 as BillingRequest::CreateBill, Error = BillingError);

// Test-only method for internal state inspection
#[cfg(test)]
client_method!(BillingClient => fn get_bill_count() -> usize as BillingRequest::GetBillCount, Error = BillingError);
