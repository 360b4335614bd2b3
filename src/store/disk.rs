use anyhow::Result;
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle};
use std::path::Path;
use tracing::debug;

use crate::store::KeyValueStore;

/// On-disk store backed by a fjall partition. Store errors are logged
/// and absorbed; callers observe an absent value instead.
pub struct FjallStore {
    _keyspace: Keyspace,
    partition: PartitionHandle,
}

impl FjallStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;

        let keyspace = fjall::Config::new(path).open()?;
        let partition = keyspace.open_partition("kv", PartitionCreateOptions::default())?;
        Ok(Self {
            _keyspace: keyspace,
            partition,
        })
    }
}

#[async_trait]
impl KeyValueStore for FjallStore {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.partition.get(key) {
            Ok(value) => value.map(|slice| slice.to_vec()),
            Err(e) => {
                debug!("FjallStore get error for {key}: {e}");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &[u8]) {
        if let Err(e) = self.partition.insert(key, value) {
            debug!("FjallStore put error for {key}: {e}");
        }
    }

    async fn remove(&self, key: &str) {
        if let Err(e) = self.partition.remove(key) {
            debug!("FjallStore remove error for {key}: {e}");
        }
    }

    async fn list_keys(&self) -> Vec<String> {
        self.partition
            .iter()
            .filter_map(|kv| match kv {
                Ok((key, _)) => Some(String::from_utf8_lossy(&key).into_owned()),
                Err(e) => {
                    debug!("FjallStore iter error: {e}");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_disk_store_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FjallStore::open(dir.path()).unwrap();

        assert!(store.get("key1").await.is_none());

        store.set("key1", b"value1").await;
        assert_eq!(store.get("key1").await, Some(b"value1".to_vec()));

        store.remove("key1").await;
        assert!(store.get("key1").await.is_none());
    }

    #[tokio::test]
    async fn test_disk_store_list_keys() {
        let dir = tempdir().unwrap();
        let store = FjallStore::open(dir.path()).unwrap();

        store.set("cache_a", b"1").await;
        store.set("favorites", b"2").await;

        let mut keys = store.list_keys().await;
        keys.sort();
        assert_eq!(keys, vec!["cache_a".to_string(), "favorites".to_string()]);
    }
}
