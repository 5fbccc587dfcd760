use tokio::sync::oneshot;

use crate::billing_actor::BillingError;
use crate::domain::{BillRequest, Sweet, SweetForm};
use crate::inventory_actor::InventoryError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enums for actor communication. Each variant includes parameters
/// and a oneshot channel for responses.

#[derive(Debug)]
pub enum InventoryRequest {
    ListSweets {
        respond_to: ServiceResponse<Vec<Sweet>, InventoryError>,
    },
    AddSweet {
        form: SweetForm,
        respond_to: ServiceResponse<usize, InventoryError>,
    },
    SearchSweet {
        code: usize,
        respond_to: ServiceResponse<Sweet, InventoryError>,
    },
    UpdateSweet {
        code: usize,
        form: SweetForm,
        respond_to: ServiceResponse<(), InventoryError>,
    },
    DeleteSweet {
        code: usize,
        respond_to: ServiceResponse<Sweet, InventoryError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum BillingRequest {
    CreateBill {
        request: BillRequest,
        respond_to: ServiceResponse<i64, BillingError>,
    },
    Shutdown,
    #[cfg(test)]
    GetBillCount {
        respond_to: ServiceResponse<usize, BillingError>,
    },
}

/// Macro for clean error response handling
macro_rules! send_error {
    ($respond_to:expr, $error:expr) => {{
        let _ = $respond_to.send(Err($error));
        return;
    }};
}

pub(crate) use send_error;
