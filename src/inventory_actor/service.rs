use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use super::InventoryError;
use crate::clients::InventoryClient;
use crate::domain::{Sweet, SweetForm};
use crate::messages::{send_error, InventoryRequest, ServiceResponse};
use crate::store::{InventoryStore, InventoryTable};

/// Sole owner of the inventory file.
///
/// **Pattern:** every request is handled to completion before the next one is
/// received, so each load-modify-save cycle runs without interleaving. The
/// table is re-read from disk for every request; nothing is cached between
/// messages.
pub struct InventoryService {
    receiver: mpsc::Receiver<InventoryRequest>,
    store: InventoryStore,
}

impl InventoryService {
    pub fn new(buffer_size: usize, store: InventoryStore) -> (Self, InventoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, store };
        let client = InventoryClient::new(sender);
        (service, client)
    }

    #[instrument(name = "inventory_service", skip(self), fields(path = %self.store.path().display()))]
    pub async fn run(mut self) {
        info!("InventoryService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                InventoryRequest::ListSweets { respond_to } => {
                    self.handle_list_sweets(respond_to).await;
                }
                InventoryRequest::AddSweet { form, respond_to } => {
                    self.handle_add_sweet(form, respond_to).await;
                }
                InventoryRequest::SearchSweet { code, respond_to } => {
                    self.handle_search_sweet(code, respond_to).await;
                }
                InventoryRequest::UpdateSweet {
                    code,
                    form,
                    respond_to,
                } => {
                    self.handle_update_sweet(code, form, respond_to).await;
                }
                InventoryRequest::DeleteSweet { code, respond_to } => {
                    self.handle_delete_sweet(code, respond_to).await;
                }
                InventoryRequest::Shutdown => {
                    info!("InventoryService shutting down");
                    break;
                }
            }
        }

        info!("InventoryService stopped");
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_list_sweets(&self, respond_to: ServiceResponse<Vec<Sweet>, InventoryError>) {
        debug!("Processing list_sweets request");

        let sweets = self.store.load().await.into_rows();
        info!(sweet_count = sweets.len(), "Listed sweets");

        let _ = respond_to.send(Ok(sweets));
    }

    #[instrument(fields(sweet_name = %form.name), skip(self, form, respond_to))]
    async fn handle_add_sweet(
        &self,
        form: SweetForm,
        respond_to: ServiceResponse<usize, InventoryError>,
    ) {
        debug!("Processing add_sweet request");

        let sweet = match form.into_sweet() {
            Ok(sweet) => sweet,
            Err(e) => {
                error!(error = %e, "Validation failed");
                send_error!(respond_to, InventoryError::ValidationError(e.to_string()));
            }
        };

        let mut table = self.store.load().await;
        let code = table.push(sweet);

        let result = self.persist(&table).await.map(|()| {
            info!(code, "Sweet added successfully");
            code
        });
        let _ = respond_to.send(result);
    }

    #[instrument(fields(code = code), skip(self, respond_to))]
    async fn handle_search_sweet(
        &self,
        code: usize,
        respond_to: ServiceResponse<Sweet, InventoryError>,
    ) {
        debug!("Processing search_sweet request");

        let table = self.store.load().await;
        let result = match table.get(code) {
            Some(sweet) => {
                info!(sweet_name = %sweet.name, "Sweet found");
                Ok(sweet.clone())
            }
            None => {
                debug!(row_count = table.len(), "Sweet not found");
                Err(InventoryError::NotFound(code))
            }
        };

        let _ = respond_to.send(result);
    }

    /// Bounds are checked before the form is coerced, so an unknown code wins
    /// over a bad payload.
    #[instrument(fields(code = code, sweet_name = %form.name), skip(self, form, respond_to))]
    async fn handle_update_sweet(
        &self,
        code: usize,
        form: SweetForm,
        respond_to: ServiceResponse<(), InventoryError>,
    ) {
        debug!("Processing update_sweet request");

        let mut table = self.store.load().await;
        if table.get(code).is_none() {
            error!(row_count = table.len(), "Sweet not found for update");
            send_error!(respond_to, InventoryError::NotFound(code));
        }

        let sweet = match form.into_sweet() {
            Ok(sweet) => sweet,
            Err(e) => {
                error!(error = %e, "Validation failed");
                send_error!(respond_to, InventoryError::ValidationError(e.to_string()));
            }
        };
        table.replace(code, sweet);

        let result = self.persist(&table).await;
        if result.is_ok() {
            info!("Sweet updated successfully");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(code = code), skip(self, respond_to))]
    async fn handle_delete_sweet(
        &self,
        code: usize,
        respond_to: ServiceResponse<Sweet, InventoryError>,
    ) {
        debug!("Processing delete_sweet request");

        let mut table = self.store.load().await;
        let Some(removed) = table.remove(code) else {
            error!(row_count = table.len(), "Sweet not found for delete");
            send_error!(respond_to, InventoryError::NotFound(code));
        };

        let result = self.persist(&table).await.map(|()| {
            info!(sweet_name = %removed.name, remaining = table.len(), "Sweet deleted successfully");
            removed
        });
        let _ = respond_to.send(result);
    }

    async fn persist(&self, table: &InventoryTable) -> Result<(), InventoryError> {
        self.store.save(table).await.map_err(|e| {
            error!(error = %e, "Failed to save inventory");
            InventoryError::StorageError(e.to_string())
        })
    }
}
