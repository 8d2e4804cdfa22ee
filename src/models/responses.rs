//! Response DTOs for the cart API
//!
//! Cart responses serialize [`crate::models::EnrichedCart`] directly; this
//! module holds the auxiliary bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for `GET /cache/stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Snapshot reads served from the cache
    pub hits: u64,
    /// Snapshot reads that fell back to the durable store
    pub misses: u64,
    /// Snapshots evicted to stay within capacity
    pub evictions: u64,
    /// Snapshots currently held
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in RFC 3339 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error body for every failed request
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Operator-facing diagnostic, only set for deployment defects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            hint: None,
        }
    }

    pub fn with_hint(error: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            hint: Some(hint.into()),
        }
    }
}
