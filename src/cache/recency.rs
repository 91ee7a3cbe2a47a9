//! Recency Map Module
//!
//! A capacity-bounded map that keeps its keys in access order and hands the
//! least recently used entry back to the caller when an insert overflows it.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use tokio::time::Instant;

use crate::cache::CacheEntry;

// == Recency Map ==
/// Bounded key → entry map ordered by recency.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
///
/// The map only selects eviction victims. Whatever must happen to an evicted
/// entry is up to the caller of [`RecencyMap::put`].
#[derive(Debug)]
pub struct RecencyMap<K, V> {
    /// Maximum number of entries
    capacity: usize,
    /// Order of keys by access time
    order: VecDeque<K>,
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K, V> RecencyMap<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty map. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity + 1),
            entries: HashMap::with_capacity(capacity + 1),
        }
    }

    // == Get ==
    /// Looks up an entry and marks its key as most recently used.
    ///
    /// Expiration is not checked here.
    pub fn get(&mut self, key: &K) -> Option<&mut CacheEntry<V>> {
        if !self.entries.contains_key(key) {
            return None;
        }
        self.promote(key);
        self.entries.get_mut(key)
    }

    // == Peek ==
    /// Looks up an entry without changing the recency order.
    pub fn peek(&self, key: &K) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    // == Put ==
    /// Inserts or replaces the value under `key` as the most recent entry.
    ///
    /// Replacing an existing key never evicts. Inserting a new key into a full
    /// map removes the least recently used entry and returns it.
    pub fn put(&mut self, key: K, value: V, now: Instant) -> Option<(K, CacheEntry<V>)> {
        let entry = CacheEntry::new(value, now);
        if self.entries.insert(key.clone(), entry).is_some() {
            self.promote(&key);
            return None;
        }

        self.order.push_front(key);
        if self.entries.len() > self.capacity {
            self.evict_oldest()
        } else {
            None
        }
    }

    // == Remove ==
    /// Removes a key. Absent keys are ignored.
    pub fn remove(&mut self, key: &K) -> Option<CacheEntry<V>> {
        let removed = self.entries.remove(key)?;
        self.order.retain(|k| k != key);
        Some(removed)
    }

    // == Clear ==
    /// Drops every entry. Nothing is reported as evicted.
    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }

    // == Retain ==
    /// Walks every entry from most to least recent and removes those for which
    /// `keep` returns false. Returns how many entries were removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&K, &CacheEntry<V>) -> bool,
    {
        let entries = &mut self.entries;
        let before = self.order.len();

        self.order.retain(|key| {
            let retained = entries.get(key).is_some_and(|entry| keep(key, entry));
            if !retained {
                entries.remove(key);
            }
            retained
        });

        before - self.order.len()
    }

    // == Iter ==
    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &CacheEntry<V>)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.entries.get(key).map(|entry| (key, entry)))
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.back()
    }

    // == Contains ==
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when the order list and the entry table describe the same keys.
    pub(crate) fn is_consistent(&self) -> bool {
        self.order.len() == self.entries.len()
            && self.order.iter().all(|key| self.entries.contains_key(key))
    }

    fn promote(&mut self, key: &K) {
        if self.order.front() == Some(key) {
            return;
        }
        self.order.retain(|k| k != key);
        self.order.push_front(key.clone());
    }

    fn evict_oldest(&mut self) -> Option<(K, CacheEntry<V>)> {
        let key = self.order.pop_back()?;
        let entry = self.entries.remove(&key)?;
        Some((key, entry))
    }
}
