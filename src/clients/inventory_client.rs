use tokio::sync::mpsc;

use super::macros::{client_method, client_shutdown};
use crate::domain::{Sweet, SweetForm};
use crate::inventory_actor::InventoryError;
use crate::messages::InventoryRequest;

/// Client for the inventory service. Cheap to clone; every clone talks to the
/// same single writer of the inventory file.
#[derive(Clone)]
pub struct InventoryClient {
    sender: mpsc::Sender<InventoryRequest>,
}

impl InventoryClient {
    pub fn new(sender: mpsc::Sender<InventoryRequest>) -> Self {
        Self { sender }
    }
}

client_shutdown!(InventoryClient, InventoryRequest);

client_method!(InventoryClient => fn list_sweets() -> Vec<Sweet> as InventoryRequest::ListSweets, Error = InventoryError);
client_method!(InventoryClient => fn add_sweet(form: SweetForm) -> usize as InventoryRequest::AddSweet, Error = InventoryError);
client_method!(InventoryClient => fn search_sweet(code: usize) -> Sweet as InventoryRequest::SearchSweet, Error = InventoryError);
client_method!(InventoryClient => fn update_sweet(code: usize, form: SweetForm) -> () as InventoryRequest::UpdateSweet, Error = InventoryError);
client_method!(InventoryClient => fn delete_sweet(code: usize) -> Sweet as InventoryRequest::DeleteSweet, Error = InventoryError);
