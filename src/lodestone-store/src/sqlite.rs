//! SQLite-backed document store via SQLx.
//!
//! Documents are stored as JSON text in a single `documents` table keyed by
//! `(collection, id)`.

use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::repository::{AsyncDocumentStore, AsyncDocumentWriter, StoreError, StoreResult};

/// Default database location, relative to the working directory
pub const DEFAULT_DB_PATH: &str = "share/lodestone.db";

/// SQLite document store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to a SQLite database URL (e.g. `sqlite:share/lodestone.db?mode=rwc`)
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqlitePoolOptions::new();
        // Each in-memory connection is its own database; keep exactly one alive.
        let options = if url.contains(":memory:") {
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            options.max_connections(5)
        };
        let pool = options.connect(url).await?;
        Ok(Self { pool })
    }

    /// Create the schema if missing
    pub async fn init(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Number of stored documents per collection
    pub async fn counts(&self) -> StoreResult<Vec<(String, i64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT collection, COUNT(*) FROM documents GROUP BY collection ORDER BY collection",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

fn parse_body(collection: &str, id: &str, body: &str) -> StoreResult<Value> {
    serde_json::from_str(body).map_err(|e| StoreError::Malformed {
        collection: collection.to_string(),
        id: id.to_string(),
        message: e.to_string(),
    })
}

impl AsyncDocumentStore for SqliteStore {
    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT body FROM documents WHERE collection = ? AND id = ?")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|(body,)| parse_body(collection, id, &body))
            .transpose()
    }

    async fn get_collection(&self, collection: &str) -> StoreResult<Vec<(String, Value)>> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT id, body FROM documents WHERE collection = ? ORDER BY id")
                .bind(collection)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|(id, body)| {
                let value = parse_body(collection, &id, &body)?;
                Ok((id, value))
            })
            .collect()
    }
}

impl AsyncDocumentWriter for SqliteStore {
    async fn put_document(&self, collection: &str, id: &str, body: &Value) -> StoreResult<()> {
        let text = serde_json::to_string(body)?;
        sqlx::query(
            r#"INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)
               ON CONFLICT (collection, id)
               DO UPDATE SET body = excluded.body, updated_at = CURRENT_TIMESTAMP"#,
        )
        .bind(collection)
        .bind(id)
        .bind(text)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
