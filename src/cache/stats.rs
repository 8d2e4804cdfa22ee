//! Snapshot cache counters.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads that found a live snapshot
    pub hits: u64,
    /// Reads that found nothing or an expired snapshot
    pub misses: u64,
    /// Snapshots dropped to respect capacity
    pub evictions: u64,
    /// Snapshots currently held
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// hits / (hits + misses), or 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        let mut stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);

        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    }
}
