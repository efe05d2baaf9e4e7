//! Recency buffer for submitted identifiers.

use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock};

/// Fixed-capacity ring of recently submitted identifiers.
///
/// The submitter writes each identifier as it enqueues the POST; the feed
/// listener reads to recognize the agent's own events when the feed echoes
/// them back. Old entries fall off in insertion order once capacity is
/// reached.
pub struct RecentSubmissions {
    inner: RwLock<Ring>,
}

struct Ring {
    slots: VecDeque<String>,
    capacity: usize,
}

impl RecentSubmissions {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: RwLock::new(Ring {
                slots: VecDeque::with_capacity(capacity),
                capacity,
            }),
        }
    }

    /// Record an identifier, evicting the oldest once at capacity.
    pub fn insert(&self, id: String) {
        let mut ring = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if ring.slots.len() == ring.capacity {
            ring.slots.pop_front();
        }
        ring.slots.push_back(id);
    }

    /// Whether an identifier is still in the buffer.
    pub fn contains(&self, id: &str) -> bool {
        let ring = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        ring.slots.iter().any(|slot| slot == id)
    }

    /// Buffered identifiers, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        let ring = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        ring.slots.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        let ring = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        ring.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
