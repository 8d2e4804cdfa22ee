//! Snapshot Cache Helper
//!
//! Reads, writes, and invalidates serialized carts on a [`CartCache`]. Every
//! failure is logged here and turned into a miss or a `false` result, so
//! callers never see a cache error.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{CacheFailure, CartCache};
use crate::models::{Cart, CartKey};

#[derive(Clone)]
pub struct SnapshotCache {
    client: Arc<dyn CartCache>,
    /// Seconds a snapshot lives; 0 disables writes but not reads
    ttl_seconds: u64,
}

impl SnapshotCache {
    pub fn new(client: Arc<dyn CartCache>, ttl_seconds: u64) -> Self {
        Self {
            client,
            ttl_seconds,
        }
    }

    // == Read ==
    /// Returns the cached cart, or `None` on a miss or any failure.
    pub async fn read_from_cache(&self, key: &CartKey) -> Option<Cart> {
        let cache_key = key.cache_key();
        match self.try_read(&cache_key).await {
            Ok(Some(cart)) => {
                debug!("Cart cache hit for {}", cache_key);
                Some(cart)
            }
            Ok(None) => {
                debug!("Cart cache miss for {}", cache_key);
                None
            }
            Err(e) => {
                warn!("Cart cache read failed for {}, treating as miss: {}", cache_key, e);
                None
            }
        }
    }

    async fn try_read(&self, cache_key: &str) -> Result<Option<Cart>, CacheFailure> {
        match self.client.get(cache_key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    // == Write ==
    /// Stores the cart snapshot. Returns whether the write happened.
    pub async fn write_to_cache(&self, key: &CartKey, cart: &Cart) -> bool {
        if self.ttl_seconds == 0 {
            return false;
        }

        let cache_key = key.cache_key();
        let result = match serde_json::to_vec(cart) {
            Ok(bytes) => self.client.set(&cache_key, bytes, self.ttl_seconds).await,
            Err(e) => Err(CacheFailure::from(e)),
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!("Cart cache write failed for {}: {}", cache_key, e);
                false
            }
        }
    }

    // == Invalidate ==
    /// Drops the cached snapshot. Returns whether the delete succeeded.
    pub async fn invalidate_cache(&self, key: &CartKey) -> bool {
        let cache_key = key.cache_key();
        match self.client.delete(&cache_key).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Cart cache invalidation failed for {}: {}", cache_key, e);
                false
            }
        }
    }

    // == Refresh ==
    /// Invalidates and then writes a fresh snapshot.
    ///
    /// If the write fails after the delete succeeded, the next read falls back
    /// to the durable store instead of serving an older snapshot.
    pub async fn refresh(&self, key: &CartKey, cart: &Cart) -> bool {
        self.invalidate_cache(key).await;
        self.write_to_cache(key, cart).await
    }
}
