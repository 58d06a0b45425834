//! Runtime-selected store backend.

use serde_json::Value;

use crate::memory::MemoryStore;
use crate::repository::{AsyncDocumentStore, AsyncDocumentWriter, StoreResult};
#[cfg(feature = "sqlx-sqlite")]
use crate::sqlite::SqliteStore;

/// Either backend behind one concrete type
#[derive(Debug)]
pub enum AnyStore {
    Memory(MemoryStore),
    #[cfg(feature = "sqlx-sqlite")]
    Sqlite(SqliteStore),
}

impl AnyStore {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            #[cfg(feature = "sqlx-sqlite")]
            Self::Sqlite(_) => "sqlite",
        }
    }
}

impl From<MemoryStore> for AnyStore {
    fn from(store: MemoryStore) -> Self {
        Self::Memory(store)
    }
}

#[cfg(feature = "sqlx-sqlite")]
impl From<SqliteStore> for AnyStore {
    fn from(store: SqliteStore) -> Self {
        Self::Sqlite(store)
    }
}

impl AsyncDocumentStore for AnyStore {
    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        match self {
            Self::Memory(s) => s.get_document(collection, id).await,
            #[cfg(feature = "sqlx-sqlite")]
            Self::Sqlite(s) => s.get_document(collection, id).await,
        }
    }

    async fn get_collection(&self, collection: &str) -> StoreResult<Vec<(String, Value)>> {
        match self {
            Self::Memory(s) => s.get_collection(collection).await,
            #[cfg(feature = "sqlx-sqlite")]
            Self::Sqlite(s) => s.get_collection(collection).await,
        }
    }
}

impl AsyncDocumentWriter for AnyStore {
    async fn put_document(&self, collection: &str, id: &str, body: &Value) -> StoreResult<()> {
        match self {
            Self::Memory(s) => s.put_document(collection, id, body).await,
            #[cfg(feature = "sqlx-sqlite")]
            Self::Sqlite(s) => s.put_document(collection, id, body).await,
        }
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<bool> {
        match self {
            Self::Memory(s) => s.delete_document(collection, id).await,
            #[cfg(feature = "sqlx-sqlite")]
            Self::Sqlite(s) => s.delete_document(collection, id).await,
        }
    }
}
