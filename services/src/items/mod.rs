pub mod storage;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An `items` row as stored. `price` is read back as `FLOAT8`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ItemRow {
    pub id: i32,
    pub collection_id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub memo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// An item in API responses.
///
/// Optional fields always serialize, as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i32,
    pub collection_id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            collection_id: row.collection_id,
            name: row.name,
            image_url: row.image_url,
            purchase_date: row.purchase_date,
            price: row.price,
            memo: row.memo,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        }
    }
}

/// Request body for `POST /api/items`.
///
/// The owning collection comes from the body, not from the URL.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemCreate {
    #[serde(default)]
    pub collection_id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub memo: Option<String>,
}

/// Request body for `PUT /api/items/{id}`.
///
/// Every field is overwritten; omitted optional fields become `NULL`.
/// A `collection_id` in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemUpdate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub memo: Option<String>,
}

/// Aggregate figures for one collection, computed per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Stats {
    pub total_items: i64,
    pub total_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_and_null_fields_decode_to_none() {
        let omitted: ItemCreate =
            serde_json::from_value(json!({"collection_id": 1, "name": "1964 Quarter"})).unwrap();
        let explicit: ItemCreate = serde_json::from_value(json!({
            "collection_id": 1,
            "name": "1964 Quarter",
            "image_url": null,
            "purchase_date": null,
            "price": null,
            "memo": null
        }))
        .unwrap();

        assert_eq!(omitted, explicit);
        assert_eq!(omitted.price, None);
        assert_eq!(omitted.memo, None);
    }

    #[test]
    fn zero_and_empty_values_are_kept() {
        let input: ItemCreate = serde_json::from_value(json!({
            "collection_id": 1,
            "name": "Gift",
            "price": 0,
            "memo": ""
        }))
        .unwrap();

        assert_eq!(input.price, Some(0.0));
        assert_eq!(input.memo.as_deref(), Some(""));
    }

    #[test]
    fn purchase_date_is_a_calendar_date() {
        let input: ItemUpdate =
            serde_json::from_value(json!({"name": "Stamp", "purchase_date": "2024-03-09"}))
                .unwrap();
        assert_eq!(input.purchase_date, NaiveDate::from_ymd_opt(2024, 3, 9));

        let bad = serde_json::from_value::<ItemUpdate>(
            json!({"name": "Stamp", "purchase_date": "2024-03-09T10:00:00Z"}),
        );
        assert!(bad.is_err());
    }

    #[test]
    fn none_serializes_as_null() {
        let now = Utc::now().naive_utc();
        let item = Item::from(ItemRow {
            id: 1,
            collection_id: 1,
            name: "1964 Quarter".to_owned(),
            image_url: None,
            purchase_date: None,
            price: Some(12.5),
            memo: None,
            created_at: now,
            updated_at: now,
        });

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["image_url"], json!(null));
        assert_eq!(value["purchase_date"], json!(null));
        assert_eq!(value["memo"], json!(null));
        assert_eq!(value["price"], json!(12.5));
    }
}
