//! Cache Engine Module
//!
//! Main cache engine combining the entry store, the recency list and the
//! size accountant. Every operation is total: it never fails and leaves the
//! three structures describing exactly the same set of live keys.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{
    unit_weight, CacheEntry, CacheStats, EntryStore, RecencyList, SizeAccountant, Weigher,
};
use crate::config::Config;

// == Cache Engine ==
/// Bounded in-memory cache with LRU eviction and lazy TTL expiration.
#[derive(Debug)]
pub struct CacheEngine {
    /// Key to entry metadata
    entries: EntryStore,
    /// Eviction order, most recent first
    recency: RecencyList,
    /// Weight total against the weight ceiling
    size: SizeAccountant,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of live entries
    max_entries: usize,
    /// Lifetime of an entry, measured from its last write
    ttl: Duration,
    /// Size-calculation hook
    weigher: Weigher,
}

impl CacheEngine {
    // == Constructor ==
    /// Creates an empty engine.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `max_weight` - Maximum summed weight of all entries
    /// * `ttl` - Lifetime of an entry after its last write, zero = never expires
    pub fn new(max_entries: usize, max_weight: usize, ttl: Duration) -> Self {
        // Sizing hint only, the ceiling may be far larger than what is ever stored
        let hint = max_entries.min(1024);
        Self {
            entries: EntryStore::with_capacity(hint),
            recency: RecencyList::with_capacity(hint),
            size: SizeAccountant::new(max_weight),
            stats: CacheStats::new(),
            max_entries,
            ttl,
            weigher: unit_weight,
        }
    }

    /// Creates an engine from the server configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_entries, config.max_weight, config.ttl())
    }

    /// Replaces the size-calculation hook used for entries written from now on.
    pub fn with_weigher(mut self, weigher: Weigher) -> Self {
        self.weigher = weigher;
        self
    }

    // == Insert Or Update ==
    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// The entry becomes the most recently used one and its TTL restarts.
    /// Least recently used entries are then evicted until both the entry
    /// ceiling and the weight ceiling hold.
    pub fn insert_or_update(&mut self, key: String, value: String) {
        self.insert_or_update_at(key, value, Instant::now());
    }

    pub(crate) fn insert_or_update_at(&mut self, key: String, value: String, now: Instant) {
        let weight = (self.weigher)(&key, &value);

        if let Some(entry) = self.entries.get_mut(&key) {
            let previous = entry.refresh(value, weight, self.ttl, now);
            self.recency.move_to_front(entry.handle);
            self.size.subtract(previous);
            self.size.add(weight);
            debug!(key = %key, "cache entry updated");
        } else {
            let handle = self.recency.push_front(key.clone());
            let entry = CacheEntry::new(value, weight, self.ttl, now, handle);
            self.entries.insert(key, entry);
            self.size.add(weight);
        }

        self.evict_overflow(now);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Lookup ==
    /// Returns the value stored under `key`, if live.
    ///
    /// A hit makes the entry the most recently used one without extending its
    /// TTL. An expired entry is dropped and reported as absent.
    pub fn lookup(&mut self, key: &str) -> Option<String> {
        self.lookup_at(key, Instant::now())
    }

    pub(crate) fn lookup_at(&mut self, key: &str, now: Instant) -> Option<String> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired_at(now) {
            self.detach(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!(key = %key, "expired cache entry dropped on lookup");
            return None;
        }

        let handle = entry.handle;
        let value = entry.value.clone();
        self.recency.move_to_front(handle);
        self.stats.record_hit();
        Some(value)
    }

    // == Remove ==
    /// Removes `key` if present. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &str) {
        if self.detach(key).is_some() {
            debug!(key = %key, "cache entry removed");
        }
    }

    // == Introspection ==
    /// Returns the number of resident entries, including expired ones not yet dropped.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reports whether `key` is resident, without touching recency or expiry.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn total_weight(&self) -> usize {
        self.size.total()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn max_weight(&self) -> usize {
        self.size.max()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Snapshot of resident keys, most recently used first.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.recency.iter().map(str::to_owned).collect()
    }

    // == Internal ==
    /// Removes `key` from all three structures.
    fn detach(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.recency.remove(entry.handle);
        self.size.subtract(entry.weight);
        Some(entry)
    }

    /// Evicts from the least recently used end until both ceilings hold.
    fn evict_overflow(&mut self, now: Instant) {
        while self.entries.len() > self.max_entries || self.size.over_limit() {
            let Some(key) = self.recency.pop_back() else {
                break;
            };
            let Some(entry) = self.entries.remove(&key) else {
                continue;
            };
            self.size.subtract(entry.weight);

            if entry.is_expired_at(now) {
                self.stats.record_expiration();
                debug!(key = %key, "expired cache entry dropped during eviction");
            } else {
                self.stats.record_eviction();
                debug!(key = %key, "cache entry evicted");
            }
        }
    }

    /// Verifies that the store, recency list and accountant agree.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        use std::collections::HashSet;

        let listed: Vec<&str> = self.recency.iter().collect();
        let listed_set: HashSet<&str> = listed.iter().copied().collect();
        let stored: HashSet<&str> = self.entries.keys().collect();

        if listed.len() != listed_set.len() {
            return Err("recency list holds duplicate keys".to_string());
        }
        if listed.len() != self.recency.len() {
            return Err("recency list length out of sync".to_string());
        }
        if listed_set != stored {
            return Err(format!(
                "store keys {:?} differ from recency keys {:?}",
                stored, listed_set
            ));
        }
        if self.entries.len() > self.max_entries {
            return Err(format!("{} entries exceed max {}", self.entries.len(), self.max_entries));
        }
        if self.size.over_limit() {
            return Err(format!("weight {} exceeds max {}", self.size.total(), self.size.max()));
        }

        let weight: usize = listed
            .iter()
            .filter_map(|key| self.entries.get(key))
            .map(|entry| entry.weight)
            .sum();
        if weight != self.size.total() {
            return Err(format!(
                "accounted weight {} but entries weigh {}",
                self.size.total(),
                weight
            ));
        }

        for key in &listed {
            let Some(entry) = self.entries.get(key) else {
                continue;
            };
            if self.recency.peek_at(entry.handle) != Some(*key) {
                return Err(format!("handle of '{}' points elsewhere", key));
            }
        }
        Ok(())
    }
}
