//! In-memory durable store.
//!
//! Behaves like a keyed row table: declared key schema, batch size limit, and
//! an offline switch for exercising failure paths.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{CartStore, KeySchema, StoreError, StoreResult, BATCH_WRITE_LIMIT};
use crate::models::CartLine;

// == Memory Cart Store ==
#[derive(Debug)]
pub struct MemoryCartStore {
    /// partition -> item id -> line
    partitions: RwLock<HashMap<String, BTreeMap<String, CartLine>>>,
    /// Key schema the table was created with
    schema: KeySchema,
    offline: AtomicBool,
    batch_requests: AtomicUsize,
}

impl MemoryCartStore {
    /// Creates an empty table keyed the way the cart service expects.
    pub fn new() -> Self {
        Self::with_schema(KeySchema::cart_lines())
    }

    /// Creates an empty table with an arbitrary key schema.
    pub fn with_schema(schema: KeySchema) -> Self {
        Self {
            partitions: RwLock::new(HashMap::new()),
            schema,
            offline: AtomicBool::new(false),
            batch_requests: AtomicUsize::new(0),
        }
    }

    /// Makes every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of batch delete requests served so far.
    pub fn batch_requests(&self) -> usize {
        self.batch_requests.load(Ordering::SeqCst)
    }

    /// Number of lines stored in a partition.
    pub async fn line_count(&self, partition: &str) -> usize {
        self.partitions
            .read()
            .await
            .get(partition)
            .map_or(0, BTreeMap::len)
    }

    fn check_request(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("cart table is offline".to_string()));
        }

        let expected = KeySchema::cart_lines();
        if self.schema != expected {
            return Err(StoreError::SchemaMismatch {
                expected,
                actual: self.schema.clone(),
            });
        }

        Ok(())
    }
}

impl Default for MemoryCartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn query_lines(&self, partition: &str) -> StoreResult<Vec<CartLine>> {
        self.check_request()?;

        let partitions = self.partitions.read().await;
        let lines = partitions
            .get(partition)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default();
        Ok(lines)
    }

    async fn put_line(&self, partition: &str, line: CartLine) -> StoreResult<()> {
        self.check_request()?;

        let mut partitions = self.partitions.write().await;
        partitions
            .entry(partition.to_string())
            .or_default()
            .insert(line.item_id.clone(), line);
        Ok(())
    }

    async fn delete_line(&self, partition: &str, item_id: &str) -> StoreResult<()> {
        self.check_request()?;

        let mut partitions = self.partitions.write().await;
        if let Some(rows) = partitions.get_mut(partition) {
            rows.remove(item_id);
            if rows.is_empty() {
                partitions.remove(partition);
            }
        }
        Ok(())
    }

    async fn delete_batch(&self, partition: &str, item_ids: &[String]) -> StoreResult<()> {
        self.check_request()?;

        if item_ids.len() > BATCH_WRITE_LIMIT {
            return Err(StoreError::BatchTooLarge {
                size: item_ids.len(),
                limit: BATCH_WRITE_LIMIT,
            });
        }

        self.batch_requests.fetch_add(1, Ordering::SeqCst);
        debug!("Batch delete of {} rows in {}", item_ids.len(), partition);

        let mut partitions = self.partitions.write().await;
        if let Some(rows) = partitions.get_mut(partition) {
            for item_id in item_ids {
                rows.remove(item_id);
            }
            if rows.is_empty() {
                partitions.remove(partition);
            }
        }
        Ok(())
    }
}
