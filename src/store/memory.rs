use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::store::KeyValueStore;

/// In-memory store backed by a HashMap. Used in tests and as the
/// fallback when the on-disk store cannot be opened.
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let map = self.inner.lock().await;
        let value = map.get(key).cloned();
        if value.is_some() {
            debug!("Store HIT for key: {key}");
        } else {
            debug!("Store MISS for key: {key}");
        }
        value
    }

    async fn set(&self, key: &str, value: &[u8]) {
        let mut map = self.inner.lock().await;
        debug!("Store PUT for key: {key}");
        map.insert(key.to_string(), value.to_vec());
    }

    async fn remove(&self, key: &str) {
        let mut map = self.inner.lock().await;
        map.remove(key);
        debug!("Store REMOVE for key: {key}");
    }

    async fn list_keys(&self) -> Vec<String> {
        let map = self.inner.lock().await;
        map.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_get_set_remove() {
        let store = MemoryStore::new();

        assert!(store.get("key1").await.is_none());

        store.set("key1", b"hello").await;
        assert_eq!(store.get("key1").await, Some(b"hello".to_vec()));

        store.remove("key1").await;
        assert!(store.get("key1").await.is_none());
    }

    #[tokio::test]
    async fn test_store_list_keys() {
        let store = MemoryStore::new();
        store.set("a", b"1").await;
        store.set("b", b"2").await;

        let mut keys = store.list_keys().await;
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }
}
