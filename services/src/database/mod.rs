//! Relational store access.
//!
//! Handlers only see the [`CatalogStore`] trait. [`PgCatalogStore`] is the
//! PostgreSQL implementation used by the binary; [`MockCatalogStore`] keeps
//! everything in memory for tests.

mod mock;
pub mod schema;

pub use mock::MockCatalogStore;

use crate::collections::{CollectionInput, CollectionRow, storage as collection_queries};
use crate::config::Config;
use crate::items::{ItemCreate, ItemRow, ItemUpdate, Stats, storage as item_queries};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::future::Future;

/// Initialize a PostgreSQL connection pool
pub async fn create_pool(config: &Config) -> anyhow::Result<PgPool> {
    let options = config.database().connect_options()?;
    let pool = PgPoolOptions::new().connect_with(options).await?;

    tracing::info!("Database connection pool established");

    Ok(pool)
}

/// Error surfaced by a store operation.
///
/// The message is the store's own text and is passed to clients unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Db(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Db(err.to_string())
    }
}

/// Operations the HTTP handlers need from the store.
///
/// Update and delete report how many rows they touched; zero is not an error.
pub trait CatalogStore: Clone + Send + Sync + 'static {
    fn is_connected(&self) -> impl Future<Output = bool> + Send;

    fn collections_list(
        &self,
    ) -> impl Future<Output = Result<Vec<CollectionRow>, StoreError>> + Send;

    fn collections_insert(
        &self,
        input: CollectionInput,
    ) -> impl Future<Output = Result<CollectionRow, StoreError>> + Send;

    fn collections_update(
        &self,
        id: i32,
        input: CollectionInput,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    fn collections_delete(&self, id: i32) -> impl Future<Output = Result<u64, StoreError>> + Send;

    fn items_list_for_collection(
        &self,
        collection_id: i32,
    ) -> impl Future<Output = Result<Vec<ItemRow>, StoreError>> + Send;

    fn items_insert(
        &self,
        input: ItemCreate,
    ) -> impl Future<Output = Result<ItemRow, StoreError>> + Send;

    fn items_update(
        &self,
        id: i32,
        input: ItemUpdate,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    fn items_delete(&self, id: i32) -> impl Future<Output = Result<u64, StoreError>> + Send;

    fn stats_for_collection(
        &self,
        collection_id: i32,
    ) -> impl Future<Output = Result<Stats, StoreError>> + Send;
}

#[derive(Clone)]
pub struct PgCatalogStore {
    pub pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for PgCatalogStore {
    async fn is_connected(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    async fn collections_list(&self) -> Result<Vec<CollectionRow>, StoreError> {
        Ok(collection_queries::list_collections(&self.pool).await?)
    }

    async fn collections_insert(&self, input: CollectionInput) -> Result<CollectionRow, StoreError> {
        Ok(collection_queries::create_collection(&self.pool, &input).await?)
    }

    async fn collections_update(&self, id: i32, input: CollectionInput) -> Result<u64, StoreError> {
        Ok(collection_queries::update_collection(&self.pool, id, &input).await?)
    }

    async fn collections_delete(&self, id: i32) -> Result<u64, StoreError> {
        Ok(collection_queries::delete_collection(&self.pool, id).await?)
    }

    async fn items_list_for_collection(&self, collection_id: i32) -> Result<Vec<ItemRow>, StoreError> {
        Ok(item_queries::list_items_for_collection(&self.pool, collection_id).await?)
    }

    async fn items_insert(&self, input: ItemCreate) -> Result<ItemRow, StoreError> {
        Ok(item_queries::create_item(&self.pool, &input).await?)
    }

    async fn items_update(&self, id: i32, input: ItemUpdate) -> Result<u64, StoreError> {
        Ok(item_queries::update_item(&self.pool, id, &input).await?)
    }

    async fn items_delete(&self, id: i32) -> Result<u64, StoreError> {
        Ok(item_queries::delete_item(&self.pool, id).await?)
    }

    async fn stats_for_collection(&self, collection_id: i32) -> Result<Stats, StoreError> {
        Ok(item_queries::stats_for_collection(&self.pool, collection_id).await?)
    }
}
