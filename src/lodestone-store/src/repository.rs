//! Read/write interface over the document store.
//!
//! Documents are addressed by `(collection, id)` and carried as JSON values;
//! typing happens in [`crate::documents`].

use serde_json::Value;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Malformed document {collection}/{id}: {message}")]
    Malformed {
        collection: String,
        id: String,
        message: String,
    },

    #[error("Invalid record: {0}")]
    Parse(#[from] lodestone::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(feature = "sqlx-sqlite")]
impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Read side of the document store
#[allow(async_fn_in_trait)]
pub trait AsyncDocumentStore {
    /// Fetch one document. `Ok(None)` when it does not exist.
    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    /// Fetch every document in a collection as `(id, body)`, ordered by id
    async fn get_collection(&self, collection: &str) -> StoreResult<Vec<(String, Value)>>;
}

/// Write side, used for seeding
#[allow(async_fn_in_trait)]
pub trait AsyncDocumentWriter {
    /// Insert or replace a document
    async fn put_document(&self, collection: &str, id: &str, body: &Value) -> StoreResult<()>;

    /// Delete a document, returning whether it existed
    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<bool>;
}
