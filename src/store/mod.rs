//! Key-value persistence primitive.
//!
//! The store holds opaque serialized values under string keys and has no
//! native TTL; expiry is layered on top by the cache store. Reads and
//! writes are atomic at single-key granularity; there are no multi-key
//! transactions.

pub mod disk;
pub mod memory;

use async_trait::async_trait;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<Vec<u8>>;
    async fn set(&self, key: &str, value: &[u8]);
    async fn remove(&self, key: &str);
    async fn list_keys(&self) -> Vec<String>;
}
