use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::billing_actor::BillingError;
use crate::chart::ChartError;
use crate::inventory_actor::InventoryError;

pub const NOT_FOUND_MESSAGE: &str = "Sweet not found";

/// Service errors as they leave the HTTP surface.
///
/// An unknown code is a 404 with a fixed message; every other failure is a
/// server error carrying the service's own message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Billing(#[from] BillingError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Inventory(InventoryError::NotFound(_))
            | ApiError::Billing(BillingError::SweetNotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::NOT_FOUND {
            NOT_FOUND_MESSAGE.to_string()
        } else {
            error!(error = %self, "Request failed");
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
