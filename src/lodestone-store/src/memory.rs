//! In-memory document store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use crate::repository::{AsyncDocumentStore, AsyncDocumentWriter, StoreResult};

type Collections = HashMap<String, BTreeMap<String, Value>>;

/// Documents held in a process-local map
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicked writer can't leave a half-written map entry, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.collections.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.collections.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert or replace a document
    pub fn insert(&self, collection: &str, id: &str, body: Value) {
        self.write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), body);
    }

    /// Remove a document, returning its body
    pub fn remove(&self, collection: &str, id: &str) -> Option<Value> {
        self.write()
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
    }

    /// Number of documents in a collection
    pub fn count(&self, collection: &str) -> usize {
        self.read().get(collection).map_or(0, BTreeMap::len)
    }
}

impl AsyncDocumentStore for MemoryStore {
    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        Ok(self
            .read()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn get_collection(&self, collection: &str) -> StoreResult<Vec<(String, Value)>> {
        Ok(self
            .read()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, body)| (id.clone(), body.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}

impl AsyncDocumentWriter for MemoryStore {
    async fn put_document(&self, collection: &str, id: &str, body: &Value) -> StoreResult<()> {
        self.insert(collection, id, body.clone());
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> StoreResult<bool> {
        Ok(self.remove(collection, id).is_some())
    }
}
