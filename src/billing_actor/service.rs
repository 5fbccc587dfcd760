use std::ops::RangeInclusive;

use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use super::BillingError;
use crate::clients::{BillingClient, InventoryClient};
use crate::domain::coerce;
use crate::domain::{Bill, BillRequest, Sweet};
use crate::inventory_actor::InventoryError;
use crate::messages::{send_error, BillingRequest, ServiceResponse};
use crate::store::BillingStore;

/// Range bill ids are drawn from. Ids are not checked for uniqueness.
pub const BILL_ID_RANGE: RangeInclusive<u32> = 1000..=9999;

/// Default bill id generator: uniform over [`BILL_ID_RANGE`].
pub fn random_bill_id() -> u32 {
    rand::rng().random_range(BILL_ID_RANGE)
}

/// Root actor for billing.
///
/// Resolves the sold sweet through the inventory service (it never opens the
/// inventory file itself), prices the sale, and owns the billing file.
pub struct BillingService {
    receiver: mpsc::Receiver<BillingRequest>,
    inventory_client: InventoryClient,
    store: BillingStore,
    next_id_fn: Box<dyn Fn() -> u32 + Send + Sync>,
}

impl BillingService {
    pub fn new(
        buffer_size: usize,
        inventory_client: InventoryClient,
        store: BillingStore,
        next_id_fn: impl Fn() -> u32 + Send + Sync + 'static,
    ) -> (Self, BillingClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            inventory_client,
            store,
            next_id_fn: Box::new(next_id_fn),
        };
        let client = BillingClient::new(sender);
        (service, client)
    }

    #[instrument(name = "billing_service", skip(self), fields(path = %self.store.path().display()))]
    pub async fn run(mut self) {
        info!("BillingService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                BillingRequest::CreateBill {
                    request,
                    respond_to,
                } => {
                    self.handle_create_bill(request, respond_to).await;
                }
                BillingRequest::Shutdown => {
                    info!("BillingService shutting down");
                    break;
                }
                #[cfg(test)]
                BillingRequest::GetBillCount { respond_to } => {
                    let result = self
                        .store
                        .load()
                        .await
                        .map(|table| table.len())
                        .map_err(|e| BillingError::StorageError(e.to_string()));
                    let _ = respond_to.send(result);
                }
            }
        }

        info!("BillingService stopped");
    }

    /// **Orchestration Handler** - resolve sweet, price the sale, record the bill.
    #[instrument(
        fields(
            sweet_code = request.sweet_code,
            customer_name = %request.customer_name,
            date = %request.date
        ),
        skip(self, request, respond_to)
    )]
    async fn handle_create_bill(
        &self,
        request: BillRequest,
        respond_to: ServiceResponse<i64, BillingError>,
    ) {
        info!("Processing create_bill request");

        // Step 1: Resolve the sweet via InventoryService
        let sweet = match self.lookup_sweet(request.sweet_code).await {
            Ok(sweet) => {
                info!(sweet_name = %sweet.name, cost = sweet.cost, "Sweet resolved");
                sweet
            }
            Err(e) => {
                error!(error = %e, "Sweet lookup failed");
                send_error!(respond_to, e);
            }
        };

        // Step 2: Price the sale
        let amount = match price(&sweet, &request) {
            Ok(amount) => amount,
            Err(e) => {
                error!(error = %e, "Validation failed");
                send_error!(respond_to, e);
            }
        };

        // Step 3: Record the bill
        let mut table = match self.store.load().await {
            Ok(table) => table,
            Err(e) => {
                error!(error = %e, "Failed to load billing table");
                send_error!(respond_to, BillingError::StorageError(e.to_string()));
            }
        };

        let billid = (self.next_id_fn)();
        let bill = Bill {
            billid,
            customer_name: request.customer_name,
            date: request.date,
            amount,
            sweet_name: sweet.name,
        };
        if let Some(previous) = table.insert(bill) {
            warn!(
                billid,
                previous_customer = %previous.customer_name,
                "Bill id already in use, overwriting existing bill"
            );
        }

        let result = match self.store.save(&table).await {
            Ok(()) => {
                info!(billid, amount, "Bill created successfully");
                Ok(amount)
            }
            Err(e) => {
                error!(error = %e, "Failed to save billing table");
                Err(BillingError::StorageError(e.to_string()))
            }
        };

        let _ = respond_to.send(result);
    }

    async fn lookup_sweet(&self, sweet_code: i64) -> Result<Sweet, BillingError> {
        let code = usize::try_from(sweet_code).map_err(|_| BillingError::SweetNotFound(sweet_code))?;
        debug!(code, "Looking up sweet");
        match self.inventory_client.search_sweet(code).await {
            Ok(sweet) => Ok(sweet),
            Err(InventoryError::NotFound(_)) => Err(BillingError::SweetNotFound(sweet_code)),
            Err(e) => Err(BillingError::InventoryUnavailable(e.to_string())),
        }
    }
}

/// `amount = quantity * cost`, with the quantity truncated to an integer.
fn price(sweet: &Sweet, request: &BillRequest) -> Result<i64, BillingError> {
    let quantity = coerce::to_int("quantity", &request.quantity)
        .map_err(|e| BillingError::ValidationError(e.to_string()))?;
    quantity.checked_mul(sweet.cost).ok_or_else(|| {
        BillingError::ValidationError(format!(
            "amount overflows: {quantity} x {}",
            sweet.cost
        ))
    })
}
