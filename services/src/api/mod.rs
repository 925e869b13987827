//! HTTP API for collections, items, stats and image uploads.
//!
//! This module organizes the API into sub-modules by resource:
//! - `collections` - Collection CRUD
//! - `items` - Item CRUD
//! - `stats` - Per-collection aggregates
//! - `uploads` - Image upload
//! - `types` - Shared types (error responses, messages)

pub mod collections;
pub mod items;
pub mod stats;
pub mod types;
pub mod uploads;

use crate::database::CatalogStore;
use crate::uploads::{MAX_UPLOAD_BYTES, UploadDir};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
    pub uploads: UploadDir,
}

impl<S> AppState<S> {
    pub fn new(store: S, uploads: UploadDir) -> Self {
        Self { store, uploads }
    }
}

/// Creates the `/api` router.
///
/// | Method | Path                          | Handler                         |
/// |--------|-------------------------------|---------------------------------|
/// | GET    | /collections                  | `collections::list`             |
/// | POST   | /collections                  | `collections::create`           |
/// | PUT    | /collections/{id}             | `collections::update`           |
/// | DELETE | /collections/{id}             | `collections::delete`           |
/// | GET    | /collections/{id}/items       | `items::list_for_collection`    |
/// | GET    | /collections/{id}/stats       | `stats::for_collection`         |
/// | POST   | /items                        | `items::create`                 |
/// | PUT    | /items/{id}                   | `items::update`                 |
/// | DELETE | /items/{id}                   | `items::delete`                 |
/// | POST   | /upload                       | `uploads::upload_image`         |
pub fn routes<S: CatalogStore>() -> Router<AppState<S>> {
    Router::new()
        // Collections
        .route(
            "/collections",
            get(collections::list::<S>).post(collections::create::<S>),
        )
        .route(
            "/collections/{id}",
            put(collections::update::<S>).delete(collections::delete::<S>),
        )
        .route(
            "/collections/{id}/items",
            get(items::list_for_collection::<S>),
        )
        .route("/collections/{id}/stats", get(stats::for_collection::<S>))
        // Items
        .route("/items", post(items::create::<S>))
        .route(
            "/items/{id}",
            put(items::update::<S>).delete(items::delete::<S>),
        )
        // Uploads
        .route(
            "/upload",
            post(uploads::upload_image::<S>).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
}
