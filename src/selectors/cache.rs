//! Bounded insertion-order cache.
//!
//! Backs the per-column memoized selectors, which need one remembered
//! result per column rather than a single last value.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// A simple cache with a fixed capacity.
///
/// When the cache exceeds capacity, the oldest (least recently inserted)
/// keys are evicted. Lookups do not promote entries; replacing the value
/// of an existing key keeps its age.
pub struct LruCache<K: Hash + Eq + Clone, V> {
    entries: HashMap<K, V>,
    order: VecDeque<K>,
    capacity: usize,
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// Create a new cache with the given capacity.
    ///
    /// A capacity of 0 disables caching entirely.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// Look up a value by key. Returns `None` if not present or capacity is 0.
    pub fn get(&self, key: &K) -> Option<&V> {
        if self.capacity == 0 {
            return None;
        }
        self.entries.get(key)
    }

    /// Insert or replace the value for `key`.
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            return;
        }
        self.entries.insert(key.clone(), value);
        self.order.push_back(key);
        self.enforce_cap();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Evict oldest entries until we're at or below capacity.
    fn enforce_cap(&mut self) {
        while self.entries.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            } else {
                break;
            }
        }
    }
}
