//! Collections and items catalog service: HTTP API, store access and image uploads.

use crate::api::AppState;
use crate::api::types::MessageResponse;
use crate::config::Config;
use crate::database::CatalogStore;
use crate::uploads::{PUBLIC_PREFIX, UploadDir};
use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{any, get},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod api;
pub mod collections;
pub mod config;
pub mod cors;
pub mod database;
pub mod items;
pub mod telemetry;
pub mod uploads;

/// Builds the full application router on top of `store`.
///
/// Uploaded images are served from the configured upload directory.
pub fn routes<S: CatalogStore>(store: S, config: &Config) -> Router {
    let upload_dir = UploadDir::new(config.upload_dir());
    let images = ServeDir::new(upload_dir.root());
    let state = AppState::new(store, upload_dir);

    Router::new()
        .route("/health", get(health_check::<S>))
        .nest("/api", api::routes::<S>())
        .nest_service(PUBLIC_PREFIX, images)
        .fallback(any(catch_all))
        .layer(middleware::from_fn(cors::cors_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    http_request.method = ?request.method(),
                    http_request.uri = ?request.uri(),
                    http_request.version = ?request.version(),
                    http_request.user_agent = ?request.headers().get(axum::http::header::USER_AGENT),
                )
            }),
        )
        .with_state(state)
}

async fn health_check<S: CatalogStore>(State(state): State<AppState<S>>) -> impl IntoResponse {
    if state.store.is_connected().await {
        (
            StatusCode::OK,
            Json(MessageResponse {
                message: "API is running".to_owned(),
                status: "healthy".to_owned(),
            }),
        )
    } else {
        (
            StatusCode::BAD_GATEWAY,
            Json(MessageResponse {
                message: "database unreachable".to_owned(),
                status: "unhealthy".to_owned(),
            }),
        )
    }
}

async fn catch_all() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
