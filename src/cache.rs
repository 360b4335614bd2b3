//! TTL-aware cache over the key-value persistence primitive.
//!
//! Every cached value is wrapped in an envelope carrying its expiry
//! timestamp; reads transparently evict expired entries. Eviction is
//! lazy, there is no background sweep.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::store::KeyValueStore;

const CACHE_PREFIX: &str = "cache_";

#[derive(Serialize, Deserialize)]
struct CacheEnvelope<T> {
    payload: T,
    /// Epoch millis; zero means the entry never expires.
    expires_at: u64,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Owns the cache namespace inside the shared store. Constructed once
/// and handed to the data service.
pub struct CacheStore {
    store: Arc<dyn KeyValueStore>,
}

impl CacheStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn namespaced(key: &str) -> String {
        format!("{CACHE_PREFIX}{key}")
    }

    /// Writes `value` with the given time-to-live. A zero TTL means the
    /// entry never expires.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let expires_at = if ttl.is_zero() {
            0
        } else {
            now_millis() + ttl.as_millis() as u64
        };
        let envelope = CacheEnvelope {
            payload: value,
            expires_at,
        };
        match serde_json::to_vec(&envelope) {
            Ok(bytes) => {
                self.store.set(&Self::namespaced(key), &bytes).await;
                debug!("Cache PUT for key: {key}");
            }
            Err(e) => debug!("failed to serialize cache entry for {key}: {e}"),
        }
    }

    /// Reads a cached value; an expired or undecodable entry is removed
    /// from the store and reported as absent.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let namespaced = Self::namespaced(key);
        let Some(bytes) = self.store.get(&namespaced).await else {
            debug!("Cache MISS for key: {key}");
            return None;
        };
        let envelope: CacheEnvelope<T> = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(e) => {
                debug!("evicting undecodable cache entry for {key}: {e}");
                self.store.remove(&namespaced).await;
                return None;
            }
        };
        if envelope.expires_at != 0 && envelope.expires_at <= now_millis() {
            debug!("Cache entry expired for key: {key}");
            self.store.remove(&namespaced).await;
            return None;
        }
        debug!("Cache HIT for key: {key}");
        Some(envelope.payload)
    }

    pub async fn remove(&self, key: &str) {
        self.store.remove(&Self::namespaced(key)).await;
    }

    /// Deletes every namespaced entry, one key at a time. O(n) in total
    /// key count, acceptable for the small persisted sets in play.
    pub async fn clear(&self) {
        for key in self.store.list_keys().await {
            if key.starts_with(CACHE_PREFIX) {
                self.store.remove(&key).await;
            }
        }
        debug!("Cache CLEAR");
    }
}

/// Builds a cache key from an operation name and its stable parameters,
/// so distinct parameter sets never collide and identical ones always
/// hit.
pub fn cache_key(operation: &str, parts: &[&str]) -> String {
    let mut key = operation.to_string();
    for part in parts {
        key.push('_');
        key.push_str(part);
    }
    key
}
