use crate::error::FrontierError;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct FrontierEntry<K, P> {
    key: K,
    payload: P,
}

impl<K: PartialEq, P> Eq for FrontierEntry<K, P> {}

impl<K: PartialEq, P> PartialEq for FrontierEntry<K, P> {
    fn eq(&self, other: &Self) -> bool {
        self.key.eq(&other.key)
    }
}

impl<K: Ord, P> PartialOrd for FrontierEntry<K, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, P> Ord for FrontierEntry<K, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that the max-heap yields the smallest key. Equal keys are left unordered.
        other.key.cmp(&self.key)
    }
}

/// Min-priority queue of `(key, payload)` pairs.
///
/// There is no decrease-key: a payload may be pushed several times and superseded entries stay in
/// place until popped. Callers discard them by checking their closed set at pop time.
pub struct Frontier<K, P> {
    heap: BinaryHeap<FrontierEntry<K, P>>,
}

impl<K: Ord, P> Default for Frontier<K, P> {
    fn default() -> Self {
        Frontier::new()
    }
}

impl<K: Ord, P> Frontier<K, P> {
    pub fn new() -> Frontier<K, P> {
        Frontier {
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, key: K, payload: P) {
        self.heap.push(FrontierEntry { key, payload });
    }

    pub fn pop_min(&mut self) -> Result<(K, P), FrontierError> {
        self.heap
            .pop()
            .map(|FrontierEntry { key, payload }| (key, payload))
            .ok_or(FrontierError::Empty)
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
