use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use serde_json::{json, Value};

use super::{ApiError, AppState};
use crate::chart;
use crate::domain::{BillRequest, Sweet, SweetForm};

static INDEX_PAGE: &str = include_str!("../../static/index.html");

pub(crate) async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

pub(crate) async fn list_sweets(State(state): State<AppState>) -> Result<Json<Vec<Sweet>>, ApiError> {
    Ok(Json(state.inventory.list_sweets().await?))
}

pub(crate) async fn add_sweet(
    State(state): State<AppState>,
    Json(form): Json<SweetForm>,
) -> Result<Json<Value>, ApiError> {
    state.inventory.add_sweet(form).await?;
    Ok(Json(json!({ "message": "Sweet added successfully" })))
}

pub(crate) async fn search_sweet(
    State(state): State<AppState>,
    Path(code): Path<usize>,
) -> Result<Json<Sweet>, ApiError> {
    Ok(Json(state.inventory.search_sweet(code).await?))
}

pub(crate) async fn update_sweet(
    State(state): State<AppState>,
    Path(code): Path<usize>,
    Json(form): Json<SweetForm>,
) -> Result<Json<Value>, ApiError> {
    state.inventory.update_sweet(code, form).await?;
    Ok(Json(json!({ "message": "Sweet updated successfully" })))
}

pub(crate) async fn delete_sweet(
    State(state): State<AppState>,
    Path(code): Path<usize>,
) -> Result<Json<Value>, ApiError> {
    state.inventory.delete_sweet(code).await?;
    Ok(Json(json!({ "message": "Sweet deleted successfully" })))
}

pub(crate) async fn create_bill(
    State(state): State<AppState>,
    Json(request): Json<BillRequest>,
) -> Result<Json<Value>, ApiError> {
    let amount = state.billing.create_bill(request).await?;
    Ok(Json(json!({
        "amount": amount,
        "message": "Bill created successfully",
    })))
}

pub(crate) async fn sweets_chart(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let chart = chart::render_inventory_chart(&state.inventory).await?;
    Ok(Json(json!({ "chart": chart })))
}
