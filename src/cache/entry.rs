//! Snapshot Entry Module
//!
//! A cached payload with its expiry deadline.

use chrono::Utc;

// == Snapshot Entry ==
/// One cached value with the moment it stops being served.
#[derive(Debug, Clone)]
pub struct SnapshotEntry {
    /// Serialized snapshot
    pub payload: Vec<u8>,
    /// Write timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Expiry timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl SnapshotEntry {
    // == Constructor ==
    /// Creates an entry expiring `ttl_seconds` from now.
    pub fn new(payload: Vec<u8>, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();

        Self {
            payload,
            stored_at: now,
            expires_at: now.saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its deadline.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime in milliseconds, zero once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
