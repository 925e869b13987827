//! Startup schema setup.
//!
//! Statements run in order, each on its own. A failing statement is logged
//! and skipped so a hand-edited schema never keeps the service from starting.

use sqlx::PgPool;

pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS collections (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)"#,
    r#"CREATE TABLE IF NOT EXISTS items (
    id SERIAL PRIMARY KEY,
    collection_id INTEGER NOT NULL REFERENCES collections(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    image_url TEXT,
    purchase_date DATE,
    price DECIMAL(10, 2),
    memo TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)"#,
    "CREATE INDEX IF NOT EXISTS idx_items_collection_id ON items(collection_id)",
    "CREATE INDEX IF NOT EXISTS idx_items_name ON items(name)",
    "CREATE INDEX IF NOT EXISTS idx_items_purchase_date ON items(purchase_date)",
];

/// First line of a statement, used to identify it in logs.
pub fn statement_head(statement: &str) -> &str {
    statement.lines().next().unwrap_or(statement).trim()
}

/// Runs every schema statement and returns how many failed.
pub async fn init_schema(pool: &PgPool) -> usize {
    let mut failures = 0;

    for statement in SCHEMA_STATEMENTS {
        if let Err(e) = sqlx::query(statement).execute(pool).await {
            failures += 1;
            tracing::warn!(
                statement = %statement_head(statement),
                error = %e,
                "Schema statement failed, continuing"
            );
        }
    }

    tracing::info!(
        statements = SCHEMA_STATEMENTS.len(),
        failures,
        "Schema initialization finished"
    );

    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_come_before_indexes() {
        assert_eq!(SCHEMA_STATEMENTS.len(), 5);
        assert!(SCHEMA_STATEMENTS[0].contains("TABLE IF NOT EXISTS collections"));
        assert!(SCHEMA_STATEMENTS[1].contains("TABLE IF NOT EXISTS items"));
        assert!(
            SCHEMA_STATEMENTS[2..]
                .iter()
                .all(|s| s.starts_with("CREATE INDEX IF NOT EXISTS"))
        );
    }

    #[test]
    fn items_cascade_from_collections() {
        assert!(SCHEMA_STATEMENTS[1].contains("REFERENCES collections(id) ON DELETE CASCADE"));
    }

    #[test]
    fn statement_head_is_first_line() {
        assert_eq!(
            statement_head(SCHEMA_STATEMENTS[0]),
            "CREATE TABLE IF NOT EXISTS collections ("
        );
        assert_eq!(
            statement_head(SCHEMA_STATEMENTS[3]),
            "CREATE INDEX IF NOT EXISTS idx_items_name ON items(name)"
        );
    }
}
