//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with the arena recency list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tracing::{debug, trace};

use crate::cache::{
    current_timestamp_ms, CacheEntry, CacheStats, EntryId, ExpiryPolicy, RecencyList,
    DEFAULT_CAPACITY,
};
use crate::config::Config;

// == Cache Store ==
/// Bounded key/value cache with LRU eviction and optional per-entry TTL.
///
/// The index maps each live key to the handle of its entry; the recency list
/// owns the entries and keeps them ordered from most to least recently used.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to entry handle
    pub(super) index: HashMap<K, EntryId>,
    /// Entry storage and access order
    pub(super) entries: RecencyList<K, V>,
    /// Performance counters; `total_entries` is filled in by `stats()`
    stats: CacheStats,
    /// Maximum number of entries allowed, fixed at construction
    capacity: usize,
    /// What `get` does with expired entries
    policy: ExpiryPolicy,
}

impl<K, V> Default for CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is accepted and yields a cache that never stores
    /// anything.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            entries: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
            policy: ExpiryPolicy::default(),
        }
    }

    /// Creates a cache from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.capacity).with_policy(config.expiry_policy)
    }

    /// Sets the expiry policy.
    pub fn with_policy(mut self, policy: ExpiryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    // == Get ==
    /// Looks up `key` and marks it most recently used.
    ///
    /// The entry's expiry is not refreshed. Under `ExpiryPolicy::Lazy` an
    /// expired entry is still returned; under `EvictOnAccess` it is removed
    /// and the lookup counts as a miss.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&CacheEntry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(id) = self.index.get(key).copied() else {
            self.stats.record_miss();
            return None;
        };

        if self.policy == ExpiryPolicy::EvictOnAccess
            && self.entries.get(id).is_some_and(CacheEntry::is_expired)
        {
            self.unregister(id);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            debug!(size = self.index.len(), "removed expired entry on access");
            return None;
        }

        self.entries.touch(id);
        self.stats.record_hit();
        self.entries.get(id)
    }

    // == Put ==
    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// On update the value is replaced and the expiry is restarted only when
    /// `ttl` is at least one millisecond. On insert into a full cache the
    /// least recently used entry is evicted first.
    ///
    /// Returns the stored entry, or None when the capacity is zero.
    pub fn put(&mut self, key: K, value: V, ttl: Option<Duration>) -> Option<&CacheEntry<K, V>> {
        if let Some(id) = self.index.get(&key).copied() {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.value = value;
                entry.refresh_expiry(ttl);
            }
            self.entries.touch(id);
            trace!("updated existing entry");
            return self.entries.get(id);
        }

        if self.capacity == 0 {
            trace!("zero-capacity cache dropped insertion");
            return None;
        }

        if self.index.len() >= self.capacity {
            self.evict();
        }

        let id = self
            .entries
            .push_front(CacheEntry::new(key.clone(), value, ttl));
        self.index.insert(key, id);

        self.entries.get(id)
    }

    // == Peek ==
    /// Looks up `key` without affecting recency, stats or expiry handling.
    pub fn peek<Q>(&self, key: &Q) -> Option<&CacheEntry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).and_then(|&id| self.entries.get(id))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Remove ==
    /// Removes `key` explicitly, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.get(key).copied()?;
        self.unregister(id).map(|entry| entry.value)
    }

    // == Purge Expired ==
    /// Removes every expired entry. Never called implicitly.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired: Vec<EntryId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(id, _)| id)
            .collect();

        let count = expired.len();
        for id in expired {
            self.unregister(id);
        }

        self.stats.record_expirations(count);
        if count > 0 {
            debug!(removed = count, size = self.index.len(), "purged expired entries");
        }
        count
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
    }

    // == Recency Accessors ==
    /// Most recently used entry.
    pub fn head(&self) -> Option<&CacheEntry<K, V>> {
        self.entries.peek_newest()
    }

    /// Least recently used entry, the next eviction victim.
    pub fn tail(&self) -> Option<&CacheEntry<K, V>> {
        self.entries.peek_oldest()
    }

    /// Entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry<K, V>> + '_ {
        self.entries.iter().map(|(_, entry)| entry)
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(CacheEntry::key)
    }

    // == Stats ==
    /// Returns current cache statistics, with `total_entries` taken from the
    /// index at call time.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Evict ==
    /// Drops the least recently used entry to make room for an insertion.
    fn evict(&mut self) {
        if let Some(victim) = self.entries.evict_oldest() {
            self.index.remove(&victim.key);
            self.stats.record_eviction();
            debug!(size = self.index.len(), "evicted least recently used entry");
        }
    }

    /// Unlinks an entry and drops it from the index.
    fn unregister(&mut self, id: EntryId) -> Option<CacheEntry<K, V>> {
        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some(entry)
    }
}
