//! JSON HTTP surface. Each route is a thin pass-through to a service client.

mod error;
mod handlers;
mod middleware;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::clients::{BillingClient, InventoryClient};

pub use error::ApiError;

/// Handles shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub inventory: InventoryClient,
    pub billing: BillingClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/sweets", get(handlers::list_sweets))
        .route("/api/sweets/add", post(handlers::add_sweet))
        .route("/api/sweets/search/:code", get(handlers::search_sweet))
        .route("/api/sweets/update/:code", put(handlers::update_sweet))
        .route("/api/sweets/delete/:code", delete(handlers::delete_sweet))
        .route("/api/bills/create", post(handlers::create_bill))
        .route("/api/charts/sweets", get(handlers::sweets_chart))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .with_state(state)
}
