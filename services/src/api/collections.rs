//! Handlers for `/api/collections` and `/api/collections/{id}`.

use super::AppState;
use super::types::{ApiError, MessageResponse};
use crate::collections::{Collection, CollectionInput};
use crate::database::CatalogStore;
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

/// GET /api/collections
pub async fn list<S: CatalogStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Collection>>, ApiError> {
    let rows = state.store.collections_list().await?;
    Ok(Json(rows.into_iter().map(Collection::from).collect()))
}

/// POST /api/collections
pub async fn create<S: CatalogStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CollectionInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;

    let row = state.store.collections_insert(input).await?;
    tracing::debug!(id = row.id, "Collection created");

    Ok((StatusCode::CREATED, Json(Collection::from(row))))
}

/// PUT /api/collections/{id}
///
/// An unknown id is not an error.
pub async fn update<S: CatalogStore>(
    State(state): State<AppState<S>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CollectionInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    let Json(input) = payload?;

    let touched = state.store.collections_update(id, input).await?;
    tracing::debug!(id, touched, "Collection update");

    Ok(Json(MessageResponse::success("Collection updated")))
}

/// DELETE /api/collections/{id}
///
/// Items of the collection are removed by the store.
pub async fn delete<S: CatalogStore>(
    State(state): State<AppState<S>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;

    let touched = state.store.collections_delete(id).await?;
    tracing::debug!(id, touched, "Collection delete");

    Ok(Json(MessageResponse::success("Collection deleted")))
}
