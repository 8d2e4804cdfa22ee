//! Recency tracking for bounded snapshot capacity.

use std::collections::VecDeque;

// == Recency Queue ==
/// Cart keys ordered by last write or read: front is newest, back is the
/// next eviction candidate.
#[derive(Debug, Default)]
pub struct RecencyQueue {
    keys: VecDeque<String>,
}

impl RecencyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `key` to the front, inserting it if unseen.
    pub fn touch(&mut self, key: &str) {
        self.forget(key);
        self.keys.push_front(key.to_string());
    }

    pub fn forget(&mut self, key: &str) {
        self.keys.retain(|k| k != key);
    }

    /// Pops the least recently used key.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.keys.pop_back()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
