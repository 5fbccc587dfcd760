//! # Sweets Shop
//!
//! Inventory and billing backend for a sweets shop, served as a JSON API.
//!
//! - **Stores** - CSV-backed inventory and billing tables → [`store`]
//! - **Services** - one actor per store, so each file has a single writer →
//!   [`inventory_actor::InventoryService`], [`billing_actor::BillingService`]
//! - **Clients** - cloneable handles with macro-generated, traced methods → [`clients`]
//! - **Chart** - pure chart data plus PNG rendering → [`chart`]
//! - **HTTP** - axum routes over the clients → [`http::router`]
//! - **System** - configuration, startup and shutdown → [`app_system::ShopSystem`]

mod app_system;
mod billing_actor;
mod chart;
mod clients;
mod domain;
mod http;
mod inventory_actor;
mod messages;
mod store;

#[cfg(test)]
mod integration_tests;

use tracing::{error, info};

use crate::app_system::{setup_tracing, Config, ShopSystem};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = Config::from_env();
    info!(
        bind = %config.bind_addr,
        inventory = %config.inventory_path.display(),
        billing = %config.billing_path.display(),
        "Starting sweets shop"
    );

    let system = ShopSystem::new(&config);
    let app = http::router(system.app_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {}", config.bind_addr, e))?;
    info!(addr = %config.bind_addr, "Listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| e.to_string());
    if let Err(e) = &served {
        error!(error = %e, "HTTP server failed");
    }

    system.shutdown().await?;
    served?;

    info!("Sweets shop stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
