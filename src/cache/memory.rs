//! In-process snapshot cache
//!
//! HashMap storage with per-entry TTL and least-recently-used eviction once
//! capacity is reached.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{
    CacheFailure, CacheStats, CartCache, RecencyQueue, SnapshotEntry, MAX_KEY_LENGTH,
    MAX_VALUE_SIZE,
};

#[derive(Debug, Default)]
struct Shelf {
    entries: HashMap<String, SnapshotEntry>,
    recency: RecencyQueue,
    stats: CacheStats,
}

impl Shelf {
    fn drop_key(&mut self, key: &str) -> bool {
        self.recency.forget(key);
        self.entries.remove(key).is_some()
    }
}

// == Memory Cache ==
#[derive(Debug)]
pub struct MemoryCache {
    shelf: RwLock<Shelf>,
    /// Maximum number of snapshots held
    max_entries: usize,
    offline: AtomicBool,
}

impl MemoryCache {
    // == Constructor ==
    pub fn new(max_entries: usize) -> Self {
        Self {
            shelf: RwLock::new(Shelf::default()),
            max_entries,
            offline: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent call fail with [`CacheFailure::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        let shelf = self.shelf.read().await;
        let mut stats = shelf.stats.clone();
        stats.total_entries = shelf.entries.len();
        stats
    }

    // == Cleanup Expired ==
    /// Drops every expired snapshot and returns how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut shelf = self.shelf.write().await;
        let expired: Vec<String> = shelf
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            shelf.drop_key(key);
        }
        expired.len()
    }

    pub async fn len(&self) -> usize {
        self.shelf.read().await.entries.len()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.shelf
            .read()
            .await
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    fn check_online(&self) -> Result<(), CacheFailure> {
        if self.offline.load(Ordering::SeqCst) {
            Err(CacheFailure::Unavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CartCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheFailure> {
        self.check_online()?;

        let mut shelf = self.shelf.write().await;
        let Some(expired) = shelf.entries.get(key).map(SnapshotEntry::is_expired) else {
            shelf.stats.record_miss();
            return Ok(None);
        };

        if expired {
            shelf.drop_key(key);
            shelf.stats.record_miss();
            return Ok(None);
        }

        shelf.stats.record_hit();
        shelf.recency.touch(key);
        Ok(shelf.entries.get(key).map(|entry| entry.payload.clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl_seconds: u64) -> Result<(), CacheFailure> {
        self.check_online()?;

        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheFailure::Rejected(format!(
                "key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheFailure::Rejected(format!(
                "value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }
        if ttl_seconds == 0 {
            return Err(CacheFailure::Rejected("ttl must be positive".to_string()));
        }

        let mut shelf = self.shelf.write().await;
        if !shelf.entries.contains_key(key) && shelf.entries.len() >= self.max_entries {
            match shelf.recency.pop_oldest() {
                Some(evicted) => {
                    debug!("Evicting snapshot {}", evicted);
                    shelf.entries.remove(&evicted);
                    shelf.stats.record_eviction();
                }
                None => {
                    return Err(CacheFailure::Rejected("cache has no capacity".to_string()));
                }
            }
        }

        shelf
            .entries
            .insert(key.to_string(), SnapshotEntry::new(value, ttl_seconds));
        shelf.recency.touch(key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheFailure> {
        self.check_online()?;

        self.shelf.write().await.drop_key(key);
        Ok(())
    }
}
