//! # Key-Value Store
//!
//! The storage seam under [`crate::persistence`]: string keys, string
//! values, last write wins.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::DbResult;
use crate::pool::Database;

/// A string key-value store.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` if nothing is stored.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;
}

impl KeyValueStore for Database {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        self.kv().get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.kv().set(key, value).await
    }
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::StoreConfig;

    #[tokio::test]
    async fn test_memory_store_clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("meal-log", "[]").await.unwrap();

        assert_eq!(other.get("meal-log").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(other.len().await, 1);
        assert!(!other.is_empty().await);
    }

    #[tokio::test]
    async fn test_database_as_store() {
        let db = Database::new(StoreConfig::in_memory()).await.unwrap();

        assert_eq!(KeyValueStore::get(&db, "items-in-meal").await.unwrap(), None);
        KeyValueStore::set(&db, "items-in-meal", "{}").await.unwrap();
        assert_eq!(
            KeyValueStore::get(&db, "items-in-meal").await.unwrap().as_deref(),
            Some("{}")
        );
    }
}
