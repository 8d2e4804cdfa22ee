//! Cart Cache Module
//!
//! The volatile tier: a byte cache holding serialized cart snapshots with a
//! TTL. Nothing in the cart service depends on it succeeding.

mod entry;
mod lru;
mod memory;
mod snapshot;
mod stats;

use async_trait::async_trait;
use thiserror::Error;

pub use entry::SnapshotEntry;
pub use lru::RecencyQueue;
pub use memory::MemoryCache;
pub use snapshot::SnapshotCache;
pub use stats::CacheStats;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed snapshot size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Cache Failure ==
/// Anything that can go wrong talking to the cache. Always downgraded to a
/// miss or a no-op by [`SnapshotCache`].
#[derive(Error, Debug)]
pub enum CacheFailure {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Rejected cache entry: {0}")]
    Rejected(String),

    #[error("Snapshot encoding failed: {0}")]
    Codec(#[from] serde_json::Error),
}

// == Cart Cache Trait ==
#[async_trait]
pub trait CartCache: Send + Sync {
    /// Returns the stored bytes, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheFailure>;

    /// Stores bytes for `ttl_seconds`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>, ttl_seconds: u64) -> Result<(), CacheFailure>;

    /// Removes a key. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheFailure>;
}
