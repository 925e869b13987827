use super::{CollectionInput, CollectionRow};
use sqlx::PgPool;

pub async fn list_collections(pool: &PgPool) -> Result<Vec<CollectionRow>, sqlx::Error> {
    sqlx::query_as::<_, CollectionRow>(
        r#"
        SELECT id, name, description, created_at, updated_at
        FROM collections
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn create_collection(
    pool: &PgPool,
    input: &CollectionInput,
) -> Result<CollectionRow, sqlx::Error> {
    sqlx::query_as::<_, CollectionRow>(
        r#"
        INSERT INTO collections (name, description)
        VALUES ($1, $2)
        RETURNING id, name, description, created_at, updated_at
        "#,
    )
    .bind(&input.name)
    .bind(&input.description)
    .fetch_one(pool)
    .await
}

/// Overwrites name and description. Returns the number of rows touched,
/// which is zero for an unknown id.
pub async fn update_collection(
    pool: &PgPool,
    id: i32,
    input: &CollectionInput,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE collections
        SET name = $1, description = $2, updated_at = CURRENT_TIMESTAMP
        WHERE id = $3
        "#,
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Deletes a collection; its items go with it through `ON DELETE CASCADE`.
pub async fn delete_collection(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM collections WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
