//! In-memory store for tests.

use super::{CatalogStore, StoreError};
use crate::collections::{CollectionInput, CollectionRow};
use crate::items::{ItemCreate, ItemRow, ItemUpdate, Stats};
use chrono::Utc;
use std::sync::{Arc, RwLock};

/// In-memory implementation of [`CatalogStore`].
///
/// Mirrors the PostgreSQL schema: ids come from per-table sequences,
/// items must reference a live collection and are removed with it.
#[derive(Clone, Default)]
pub struct MockCatalogStore {
    inner: Arc<RwLock<Tables>>,
    disconnected: bool,
}

#[derive(Default)]
struct Tables {
    collections: Vec<CollectionRow>,
    items: Vec<ItemRow>,
    next_collection_id: i32,
    next_item_id: i32,
}

impl MockCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose connectivity probe fails. Data operations still work.
    pub fn disconnected() -> Self {
        Self {
            disconnected: true,
            ..Self::default()
        }
    }

    /// Number of stored collections (for tests).
    pub fn collection_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").collections.len()
    }

    /// Number of stored items (for tests).
    pub fn item_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").items.len()
    }
}

fn newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> (chrono::NaiveDateTime, i32)) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

impl CatalogStore for MockCatalogStore {
    async fn is_connected(&self) -> bool {
        !self.disconnected
    }

    async fn collections_list(&self) -> Result<Vec<CollectionRow>, StoreError> {
        let tables = self.inner.read().expect("lock poisoned");
        let mut rows = tables.collections.clone();
        newest_first(&mut rows, |c| (c.created_at, c.id));
        Ok(rows)
    }

    async fn collections_insert(&self, input: CollectionInput) -> Result<CollectionRow, StoreError> {
        let mut tables = self.inner.write().expect("lock poisoned");
        tables.next_collection_id += 1;

        let now = Utc::now().naive_utc();
        let row = CollectionRow {
            id: tables.next_collection_id,
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        tables.collections.push(row.clone());
        Ok(row)
    }

    async fn collections_update(&self, id: i32, input: CollectionInput) -> Result<u64, StoreError> {
        let mut tables = self.inner.write().expect("lock poisoned");
        let Some(row) = tables.collections.iter_mut().find(|c| c.id == id) else {
            return Ok(0);
        };

        row.name = input.name;
        row.description = input.description;
        row.updated_at = Utc::now().naive_utc();
        Ok(1)
    }

    async fn collections_delete(&self, id: i32) -> Result<u64, StoreError> {
        let mut tables = self.inner.write().expect("lock poisoned");
        let before = tables.collections.len();
        tables.collections.retain(|c| c.id != id);
        let removed = (before - tables.collections.len()) as u64;

        if removed > 0 {
            tables.items.retain(|i| i.collection_id != id);
        }
        Ok(removed)
    }

    async fn items_list_for_collection(&self, collection_id: i32) -> Result<Vec<ItemRow>, StoreError> {
        let tables = self.inner.read().expect("lock poisoned");
        let mut rows: Vec<ItemRow> = tables
            .items
            .iter()
            .filter(|i| i.collection_id == collection_id)
            .cloned()
            .collect();
        newest_first(&mut rows, |i| (i.created_at, i.id));
        Ok(rows)
    }

    async fn items_insert(&self, input: ItemCreate) -> Result<ItemRow, StoreError> {
        let mut tables = self.inner.write().expect("lock poisoned");
        if !tables
            .collections
            .iter()
            .any(|c| c.id == input.collection_id)
        {
            return Err(StoreError::Db(format!(
                "insert or update on table \"items\" violates foreign key constraint \
                 \"items_collection_id_fkey\": Key (collection_id)=({}) is not present in table \"collections\"",
                input.collection_id
            )));
        }

        tables.next_item_id += 1;
        let now = Utc::now().naive_utc();
        let row = ItemRow {
            id: tables.next_item_id,
            collection_id: input.collection_id,
            name: input.name,
            image_url: input.image_url,
            purchase_date: input.purchase_date,
            // NUMERIC(10, 2) keeps two fraction digits
            price: input.price.map(|p| (p * 100.0).round() / 100.0),
            memo: input.memo,
            created_at: now,
            updated_at: now,
        };
        tables.items.push(row.clone());
        Ok(row)
    }

    async fn items_update(&self, id: i32, input: ItemUpdate) -> Result<u64, StoreError> {
        let mut tables = self.inner.write().expect("lock poisoned");
        let Some(row) = tables.items.iter_mut().find(|i| i.id == id) else {
            return Ok(0);
        };

        row.name = input.name;
        row.image_url = input.image_url;
        row.purchase_date = input.purchase_date;
        row.price = input.price.map(|p| (p * 100.0).round() / 100.0);
        row.memo = input.memo;
        row.updated_at = Utc::now().naive_utc();
        Ok(1)
    }

    async fn items_delete(&self, id: i32) -> Result<u64, StoreError> {
        let mut tables = self.inner.write().expect("lock poisoned");
        let before = tables.items.len();
        tables.items.retain(|i| i.id != id);
        Ok((before - tables.items.len()) as u64)
    }

    async fn stats_for_collection(&self, collection_id: i32) -> Result<Stats, StoreError> {
        let tables = self.inner.read().expect("lock poisoned");
        let owned = tables
            .items
            .iter()
            .filter(|i| i.collection_id == collection_id);

        let mut stats = Stats::default();
        for item in owned {
            stats.total_items += 1;
            stats.total_price += item.price.unwrap_or(0.0);
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins() -> CollectionInput {
        CollectionInput {
            name: "Coins".to_owned(),
            description: Some("my coin collection".to_owned()),
        }
    }

    fn item_in(collection_id: i32, price: Option<f64>) -> ItemCreate {
        ItemCreate {
            collection_id,
            name: "1964 Quarter".to_owned(),
            price,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = MockCatalogStore::new();
        let first = store.collections_insert(coins()).await.unwrap();
        let second = store.collections_insert(coins()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MockCatalogStore::new();
        store.collections_insert(coins()).await.unwrap();
        store.collections_insert(coins()).await.unwrap();

        let ids: Vec<i32> = store
            .collections_list()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_item_requires_live_collection() {
        let store = MockCatalogStore::new();

        let err = store.items_insert(item_in(7, None)).await.unwrap_err();
        assert!(err.to_string().contains("foreign key constraint"));
        assert_eq!(store.item_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_items() {
        let store = MockCatalogStore::new();
        let keep = store.collections_insert(coins()).await.unwrap();
        let gone = store.collections_insert(coins()).await.unwrap();
        store.items_insert(item_in(keep.id, None)).await.unwrap();
        store.items_insert(item_in(gone.id, None)).await.unwrap();

        assert_eq!(store.collections_delete(gone.id).await.unwrap(), 1);
        assert_eq!(store.item_count(), 1);
        assert!(
            store
                .items_list_for_collection(gone.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_missing_ids_touch_nothing() {
        let store = MockCatalogStore::new();

        assert_eq!(store.collections_update(9, coins()).await.unwrap(), 0);
        assert_eq!(store.collections_delete(9).await.unwrap(), 0);
        assert_eq!(store.items_update(9, ItemUpdate::default()).await.unwrap(), 0);
        assert_eq!(store.items_delete(9).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stats_sum_skips_null_prices() {
        let store = MockCatalogStore::new();
        let c = store.collections_insert(coins()).await.unwrap();

        assert_eq!(store.stats_for_collection(c.id).await.unwrap(), Stats::default());

        store.items_insert(item_in(c.id, None)).await.unwrap();
        let stats = store.stats_for_collection(c.id).await.unwrap();
        assert_eq!(stats.total_items, 1);
        assert_eq!(stats.total_price, 0.0);

        store.items_insert(item_in(c.id, Some(12.5))).await.unwrap();
        store.items_insert(item_in(c.id, Some(0.25))).await.unwrap();
        let stats = store.stats_for_collection(c.id).await.unwrap();
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.total_price, 12.75);
    }
}
