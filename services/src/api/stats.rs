use super::AppState;
use super::types::ApiError;
use crate::database::CatalogStore;
use crate::items::Stats;
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

/// GET /api/collections/{id}/stats
pub async fn for_collection<S: CatalogStore>(
    State(state): State<AppState<S>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Stats>, ApiError> {
    let Path(collection_id) = path?;
    Ok(Json(state.store.stats_for_collection(collection_id).await?))
}
