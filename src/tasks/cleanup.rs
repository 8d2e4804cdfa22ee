//! Expired Snapshot Sweeper
//!
//! Background task that periodically drops expired cart snapshots from the
//! in-process cache so abandoned carts do not hold capacity until evicted.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Spawns a background task that periodically removes expired snapshots.
///
/// # Arguments
/// * `cache` - shared in-process snapshot cache
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_cleanup_task(cache: Arc<MemoryCache>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting snapshot cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired().await;
            if removed > 0 {
                info!("Snapshot cleanup: removed {} expired carts", removed);
            } else {
                debug!("Snapshot cleanup: no expired carts found");
            }
        }
    })
}
