//! Handlers for `/api/collections/{id}/items` and `/api/items/*`.

use super::AppState;
use super::types::{ApiError, MessageResponse};
use crate::database::CatalogStore;
use crate::items::{Item, ItemCreate, ItemUpdate};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

/// GET /api/collections/{id}/items
pub async fn list_for_collection<S: CatalogStore>(
    State(state): State<AppState<S>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let Path(collection_id) = path?;

    let rows = state.store.items_list_for_collection(collection_id).await?;
    Ok(Json(rows.into_iter().map(Item::from).collect()))
}

/// POST /api/items
///
/// The owning collection is read from the body's `collection_id`.
pub async fn create<S: CatalogStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ItemCreate>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;

    let row = state.store.items_insert(input).await?;
    tracing::debug!(id = row.id, collection_id = row.collection_id, "Item created");

    Ok((StatusCode::CREATED, Json(Item::from(row))))
}

/// PUT /api/items/{id}
pub async fn update<S: CatalogStore>(
    State(state): State<AppState<S>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ItemUpdate>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    let Json(input) = payload?;

    let touched = state.store.items_update(id, input).await?;
    tracing::debug!(id, touched, "Item update");

    Ok(Json(MessageResponse::success("Item updated")))
}

/// DELETE /api/items/{id}
pub async fn delete<S: CatalogStore>(
    State(state): State<AppState<S>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;

    let touched = state.store.items_delete(id).await?;
    tracing::debug!(id, touched, "Item delete");

    Ok(Json(MessageResponse::success("Item deleted")))
}
