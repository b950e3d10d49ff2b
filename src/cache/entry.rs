//! Cache Entry Module
//!
//! Defines individual cache entries: payload, TTL metadata and recency links.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Entry Handle ==
/// Stable handle to an entry slot in the recency arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) usize);

// == Cache Entry ==
/// A single cache entry with value, expiry metadata and list linkage.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Creation timestamp (Unix milliseconds)
    pub(crate) created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub(crate) expires_at: Option<u64>,
    /// Towards the head (more recently used)
    pub(crate) prev: Option<EntryId>,
    /// Towards the tail (less recently used)
    pub(crate) next: Option<EntryId>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates an unlinked entry. A TTL shorter than one millisecond means
    /// "never expires".
    pub fn new(key: K, value: V, ttl: Option<Duration>) -> Self {
        let now = current_timestamp_ms();

        Self {
            key,
            value,
            created_at: now,
            expires_at: ttl_millis(ttl).map(|ttl| now.saturating_add(ttl)),
            prev: None,
            next: None,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Absolute expiry in Unix milliseconds, if any.
    pub fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }

    // == Refresh Expiry ==
    /// Restarts the TTL clock from now. Invalid TTLs leave the current expiry
    /// untouched.
    pub fn refresh_expiry(&mut self, ttl: Option<Duration>) {
        if let Some(ttl) = ttl_millis(ttl) {
            self.expires_at = Some(current_timestamp_ms().saturating_add(ttl));
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is at or past `expires_at`.
    /// Entries without an expiry never expire. This is a pure predicate: it
    /// does not remove anything from the cache.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    pub(crate) fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(0)` if the entry has expired
    /// - `Some(remaining_ms)` if the entry has TTL and hasn't expired
    /// - `None` if the entry never expires
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at
            .map(|expires| expires.saturating_sub(current_timestamp_ms()))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

/// Whole milliseconds of a usable TTL; None when absent or below 1 ms.
/// TTLs beyond `u64::MAX` milliseconds saturate.
pub(crate) fn ttl_millis(ttl: Option<Duration>) -> Option<u64> {
    ttl.map(|ttl| u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX))
        .filter(|&ms| ms > 0)
}
