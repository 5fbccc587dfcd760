//! Inventory cost chart.
//!
//! [`chart_data`] turns inventory rows into categories and bars without
//! touching any drawing code; [`render_png`] and [`data_uri`] turn that into
//! the payload clients embed.

mod data;
mod render;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::clients::InventoryClient;
use crate::inventory_actor::InventoryError;

pub use data::*;
pub use render::*;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChartError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error("Chart render error: {0}")]
    RenderError(String),
}

/// Renders the current inventory as a PNG data URI. Nothing is cached; every
/// call reads the inventory and draws from scratch.
#[instrument(skip(inventory))]
pub async fn render_inventory_chart(inventory: &InventoryClient) -> Result<String, ChartError> {
    let sweets = inventory.list_sweets().await?;
    let data = chart_data(&sweets);
    if data.is_empty() {
        debug!("Inventory is empty, rendering bare axes");
    }
    debug!(
        categories = data.categories().len(),
        bars = data.bars().len(),
        "Rendering chart"
    );

    let png = tokio::task::spawn_blocking(move || render_png(&data))
        .await
        .map_err(|e| ChartError::RenderError(e.to_string()))??;
    Ok(data_uri(&png))
}
