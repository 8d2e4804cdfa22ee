//! Durable Cart Store
//!
//! The authoritative row store: one row per cart line, partitioned by cart.
//! Only the interface lives here plus an in-memory implementation used by the
//! binary and the tests.

mod memory;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::CartLine;

pub use memory::MemoryCartStore;

// == Public Constants ==
/// Maximum number of rows a single batch write may touch. Imposed by the
/// durable store, not by the cart logic.
pub const BATCH_WRITE_LIMIT: usize = 25;

// == Key Schema ==
/// Attribute names forming a table's primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    pub partition_key: String,
    pub sort_key: String,
}

impl KeySchema {
    pub fn new(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: sort_key.into(),
        }
    }

    /// Row layout the cart service reads and writes.
    pub fn cart_lines() -> Self {
        Self::new("userId", "itemId")
    }
}

impl fmt::Display for KeySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.partition_key, self.sort_key)
    }
}

// == Store Error ==
#[derive(Error, Debug)]
pub enum StoreError {
    /// The table is keyed differently from the cart row layout
    #[error("Key schema mismatch: expected {expected}, table uses {actual}")]
    SchemaMismatch {
        expected: KeySchema,
        actual: KeySchema,
    },

    /// A batch exceeded [`BATCH_WRITE_LIMIT`]
    #[error("Batch of {size} rows exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },

    /// Connection, timeout, or throttling failure
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Cart Store Trait ==
/// Row-level access to cart lines, addressed by partition key.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Returns every line in the partition.
    async fn query_lines(&self, partition: &str) -> StoreResult<Vec<CartLine>>;

    /// Inserts or overwrites the line for `line.item_id`.
    async fn put_line(&self, partition: &str, line: CartLine) -> StoreResult<()>;

    /// Deletes one line. Deleting a missing line succeeds.
    async fn delete_line(&self, partition: &str, item_id: &str) -> StoreResult<()>;

    /// Deletes at most [`BATCH_WRITE_LIMIT`] lines in one request.
    async fn delete_batch(&self, partition: &str, item_ids: &[String]) -> StoreResult<()>;

    /// Deletes any number of lines, split into batches the store accepts.
    ///
    /// A failed batch aborts the remaining ones; lines already deleted stay
    /// deleted, so retrying the whole call is safe.
    async fn batch_delete_lines(&self, partition: &str, item_ids: &[String]) -> StoreResult<()> {
        for chunk in item_ids.chunks(BATCH_WRITE_LIMIT) {
            self.delete_batch(partition, chunk).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_schema_display() {
        assert_eq!(KeySchema::cart_lines().to_string(), "(userId, itemId)");
    }
}
