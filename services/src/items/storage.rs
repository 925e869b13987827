use super::{ItemCreate, ItemRow, ItemUpdate, Stats};
use sqlx::PgPool;

pub async fn list_items_for_collection(
    pool: &PgPool,
    collection_id: i32,
) -> Result<Vec<ItemRow>, sqlx::Error> {
    sqlx::query_as::<_, ItemRow>(
        r#"
        SELECT id, collection_id, name, image_url, purchase_date, price::FLOAT8 AS price,
               memo, created_at, updated_at
        FROM items
        WHERE collection_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(collection_id)
    .fetch_all(pool)
    .await
}

/// Inserts an item. An unknown `collection_id` fails on the foreign key.
pub async fn create_item(pool: &PgPool, input: &ItemCreate) -> Result<ItemRow, sqlx::Error> {
    sqlx::query_as::<_, ItemRow>(
        r#"
        INSERT INTO items (collection_id, name, image_url, purchase_date, price, memo)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, collection_id, name, image_url, purchase_date, price::FLOAT8 AS price,
                  memo, created_at, updated_at
        "#,
    )
    .bind(input.collection_id)
    .bind(&input.name)
    .bind(&input.image_url)
    .bind(input.purchase_date)
    .bind(input.price)
    .bind(&input.memo)
    .fetch_one(pool)
    .await
}

/// Overwrites every mutable column. `collection_id` is left alone.
pub async fn update_item(pool: &PgPool, id: i32, input: &ItemUpdate) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE items
        SET name = $1, image_url = $2, purchase_date = $3, price = $4, memo = $5,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = $6
        "#,
    )
    .bind(&input.name)
    .bind(&input.image_url)
    .bind(input.purchase_date)
    .bind(input.price)
    .bind(&input.memo)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_item(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM items WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn stats_for_collection(pool: &PgPool, collection_id: i32) -> Result<Stats, sqlx::Error> {
    sqlx::query_as::<_, Stats>(
        r#"
        SELECT COUNT(*) AS total_items, COALESCE(SUM(price), 0)::FLOAT8 AS total_price
        FROM items
        WHERE collection_id = $1
        "#,
    )
    .bind(collection_id)
    .fetch_one(pool)
    .await
}
