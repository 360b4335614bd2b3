//! Watch-list and search-history persistence.
//!
//! Both live in the key-value primitive as single serialized collection
//! values, read-modify-written wholesale. Entries are unique by fund
//! code; legacy persisted shapes are migrated to the rich entry shape
//! on first read.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::model::FavoriteEntry;
use crate::store::KeyValueStore;

const FAVORITES_KEY: &str = "favorites";
const SEARCH_HISTORY_KEY: &str = "search_history";
const SEARCH_HISTORY_LIMIT: usize = 20;

/// Earlier releases persisted favorites as plain code strings or as
/// `fundcode`-keyed objects, with and without embedded positions.
#[derive(Debug, Deserialize)]
struct StoredEntry {
    #[serde(alias = "fundcode")]
    code: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    shares: f64,
    #[serde(default)]
    cost: f64,
    #[serde(default)]
    added_at: i64,
}

pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the watch list in display order. Legacy shapes are
    /// migrated and written back in the rich shape the first time they
    /// are seen.
    pub async fn list(&self) -> Vec<FavoriteEntry> {
        let Some(bytes) = self.store.get(FAVORITES_KEY).await else {
            return Vec::new();
        };
        let raw: Vec<Value> = match serde_json::from_slice(&bytes) {
            Ok(values) => values,
            Err(e) => {
                warn!("favorites list is unreadable, starting empty: {e}");
                return Vec::new();
            }
        };

        let mut migrated = false;
        let mut entries: Vec<FavoriteEntry> = Vec::with_capacity(raw.len());
        for item in raw {
            let entry = match item {
                Value::String(code) => {
                    migrated = true;
                    Some(FavoriteEntry {
                        code,
                        ..Default::default()
                    })
                }
                Value::Object(_) => {
                    if item.get("fundcode").is_some() {
                        migrated = true;
                    }
                    match serde_json::from_value::<StoredEntry>(item) {
                        Ok(stored) => Some(FavoriteEntry {
                            code: stored.code,
                            name: stored.name,
                            shares: stored.shares,
                            cost: stored.cost,
                            added_at: stored.added_at,
                        }),
                        Err(e) => {
                            debug!("dropping unreadable favorite entry: {e}");
                            migrated = true;
                            None
                        }
                    }
                }
                _ => {
                    migrated = true;
                    None
                }
            };
            // Codes stay unique across the list; first occurrence wins.
            if let Some(entry) = entry
                && !entry.code.is_empty()
                && !entries.iter().any(|e| e.code == entry.code)
            {
                entries.push(entry);
            } else {
                migrated = true;
            }
        }

        if migrated {
            self.save(&entries).await;
        }
        entries
    }

    /// Adds a fund to the front of the list with an empty position.
    /// Adding a code that is already present is a no-op.
    pub async fn add(&self, code: &str, name: &str) -> bool {
        let code = code.trim();
        if code.is_empty() {
            warn!("refusing to add favorite with empty code");
            return false;
        }
        let mut entries = self.list().await;
        if entries.iter().any(|e| e.code == code) {
            return true;
        }
        entries.insert(
            0,
            FavoriteEntry {
                code: code.to_string(),
                name: name.to_string(),
                shares: 0.0,
                cost: 0.0,
                added_at: Utc::now().timestamp_millis(),
            },
        );
        self.save(&entries).await;
        true
    }

    /// Removing a code that is not on the list succeeds unchanged.
    pub async fn remove(&self, code: &str) -> bool {
        let mut entries = self.list().await;
        let before = entries.len();
        entries.retain(|e| e.code != code);
        if entries.len() != before {
            self.save(&entries).await;
        }
        true
    }

    pub async fn contains(&self, code: &str) -> bool {
        self.list().await.iter().any(|e| e.code == code)
    }

    /// Updates a held position in place. Returns false when the code is
    /// not on the list.
    pub async fn set_position(&self, code: &str, shares: f64, cost: f64) -> bool {
        let mut entries = self.list().await;
        let Some(entry) = entries.iter_mut().find(|e| e.code == code) else {
            return false;
        };
        entry.shares = shares.max(0.0);
        entry.cost = cost.max(0.0);
        self.save(&entries).await;
        true
    }

    async fn save(&self, entries: &[FavoriteEntry]) {
        match serde_json::to_vec(entries) {
            Ok(bytes) => self.store.set(FAVORITES_KEY, &bytes).await,
            Err(e) => warn!("failed to persist favorites: {e}"),
        }
    }

    pub async fn search_history(&self) -> Vec<String> {
        let Some(bytes) = self.store.get(SEARCH_HISTORY_KEY).await else {
            return Vec::new();
        };
        serde_json::from_slice(&bytes).unwrap_or_default()
    }

    /// Prepends a keyword, deduplicating and capping the history length.
    /// Blank keywords are ignored.
    pub async fn add_search_history(&self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return false;
        }
        let mut history = self.search_history().await;
        history.retain(|k| k != keyword);
        history.insert(0, keyword.to_string());
        history.truncate(SEARCH_HISTORY_LIMIT);
        match serde_json::to_vec(&history) {
            Ok(bytes) => {
                self.store.set(SEARCH_HISTORY_KEY, &bytes).await;
                true
            }
            Err(e) => {
                warn!("failed to persist search history: {e}");
                false
            }
        }
    }

    pub async fn clear_search_history(&self) {
        self.store.remove(SEARCH_HISTORY_KEY).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn new_store() -> (FavoritesStore, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (FavoritesStore::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_add_prepends_with_empty_position() {
        let (favorites, _) = new_store();

        assert!(favorites.add("000001", "Example Growth").await);
        assert!(favorites.add("000002", "Example Bond").await);

        let entries = favorites.list().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code, "000002");
        assert_eq!(entries[1].code, "000001");
        assert_eq!(entries[0].shares, 0.0);
        assert_eq!(entries[0].cost, 0.0);
        assert!(entries[0].added_at > 0);
    }

    #[tokio::test]
    async fn test_add_existing_code_is_noop() {
        let (favorites, _) = new_store();

        favorites.add("000001", "Example Growth").await;
        favorites.set_position("000001", 100.0, 1.25).await;

        assert!(favorites.add("000001", "Renamed").await);

        let entries = favorites.list().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Example Growth");
        assert_eq!(entries[0].shares, 100.0);
        assert_eq!(entries[0].cost, 1.25);
    }

    #[tokio::test]
    async fn test_remove_nonexistent_code_reports_success() {
        let (favorites, _) = new_store();
        favorites.add("000001", "Example Growth").await;

        assert!(favorites.remove("999999").await);
        assert_eq!(favorites.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_set_position_updates_in_place() {
        let (favorites, _) = new_store();
        favorites.add("000001", "Example Growth").await;

        assert!(favorites.set_position("000001", 50.0, 1.1).await);
        assert!(!favorites.set_position("999999", 1.0, 1.0).await);

        let entries = favorites.list().await;
        assert_eq!(entries[0].shares, 50.0);
        assert_eq!(entries[0].cost, 1.1);
    }

    #[tokio::test]
    async fn test_negative_position_clamped_to_zero() {
        let (favorites, _) = new_store();
        favorites.add("000001", "Example Growth").await;
        favorites.set_position("000001", -3.0, -1.0).await;

        let entries = favorites.list().await;
        assert_eq!(entries[0].shares, 0.0);
        assert_eq!(entries[0].cost, 0.0);
    }

    #[tokio::test]
    async fn test_migrates_legacy_plain_code_entries() {
        let (favorites, store) = new_store();
        store
            .set(FAVORITES_KEY, br#"["000001","000002"]"#)
            .await;

        let entries = favorites.list().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code, "000001");
        assert_eq!(entries[0].shares, 0.0);

        // The migrated shape was written back.
        let bytes = store.get(FAVORITES_KEY).await.unwrap();
        let reread: Vec<FavoriteEntry> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(reread.len(), 2);
        assert_eq!(reread[1].code, "000002");
    }

    #[tokio::test]
    async fn test_migrates_legacy_fundcode_objects() {
        let (favorites, store) = new_store();
        store
            .set(
                FAVORITES_KEY,
                br#"[{"fundcode":"000001","name":"Legacy","shares":10.0,"cost":1.2}, "000001", {"fundcode":"000003"}]"#,
            )
            .await;

        let entries = favorites.list().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code, "000001");
        assert_eq!(entries[0].name, "Legacy");
        assert_eq!(entries[0].shares, 10.0);
        assert_eq!(entries[1].code, "000003");
    }

    #[tokio::test]
    async fn test_unreadable_favorites_start_empty() {
        let (favorites, store) = new_store();
        store.set(FAVORITES_KEY, b"not json").await;
        assert!(favorites.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_history_dedups_and_caps() {
        let (favorites, _) = new_store();

        assert!(!favorites.add_search_history("  ").await);

        for i in 0..25 {
            favorites.add_search_history(&format!("kw{i}")).await;
        }
        favorites.add_search_history("kw3").await;

        let history = favorites.search_history().await;
        assert_eq!(history.len(), SEARCH_HISTORY_LIMIT);
        assert_eq!(history[0], "kw3");
        assert_eq!(history.iter().filter(|k| *k == "kw3").count(), 1);

        favorites.clear_search_history().await;
        assert!(favorites.search_history().await.is_empty());
    }
}
