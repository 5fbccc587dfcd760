use tracing::{error, info, instrument};

use super::Config;
use crate::billing_actor::{random_bill_id, BillingService};
use crate::clients::{BillingClient, InventoryClient};
use crate::http::AppState;
use crate::inventory_actor::InventoryService;
use crate::store::{BillingStore, InventoryStore};

/// The server instance: starts the service actors, wires them together and
/// shuts them down.
///
/// **Startup Order:**
/// 1. Start the inventory service (no dependencies)
/// 2. Start the billing service with an inventory client
pub struct ShopSystem {
    pub inventory_client: InventoryClient,
    pub billing_client: BillingClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    pub fn new(config: &Config) -> Self {
        Self::with_bill_ids(config, random_bill_id)
    }

    /// Same as [`ShopSystem::new`] with a caller-supplied bill id generator.
    #[instrument(name = "shop_system", skip(next_bill_id))]
    pub fn with_bill_ids(
        config: &Config,
        next_bill_id: impl Fn() -> u32 + Send + Sync + 'static,
    ) -> Self {
        let mut handles = Vec::new();

        info!("Starting shop system");

        let inventory_store = InventoryStore::new(&config.inventory_path);
        let (inventory_service, inventory_client) =
            InventoryService::new(config.mailbox_size, inventory_store);
        handles.push(tokio::spawn(inventory_service.run()));

        let billing_store = BillingStore::new(&config.billing_path);
        let (billing_service, billing_client) = BillingService::new(
            config.mailbox_size,
            inventory_client.clone(),
            billing_store,
            next_bill_id,
        );
        handles.push(tokio::spawn(billing_service.run()));

        info!("Shop system started successfully");

        Self {
            inventory_client,
            billing_client,
            handles,
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            inventory: self.inventory_client.clone(),
            billing: self.billing_client.clone(),
        }
    }

    /// Billing goes first since it depends on inventory.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down shop system");

        let _ = self.billing_client.shutdown().await;
        let _ = self.inventory_client.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
            }
        }

        info!("Shop system shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillRequest, SweetForm};

    #[tokio::test]
    async fn test_system_wiring() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let config = Config {
            inventory_path: dir.path().join("sweets.csv"),
            billing_path: dir.path().join("customer.csv"),
            ..Config::default()
        };
        let system = ShopSystem::with_bill_ids(&config, || 1111);

        system
            .inventory_client
            .add_sweet(SweetForm::new("Peda", 40, 6, "Khoa"))
            .await?;
        let amount = system
            .billing_client
            .create_bill(BillRequest::new(0, "Ivan", "2024-08-08", 2))
            .await?;
        assert_eq!(amount, 80);

        system.shutdown().await?;
        assert!(config.inventory_path.exists());
        assert!(config.billing_path.exists());
        Ok(())
    }
}
