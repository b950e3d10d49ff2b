//! Response DTOs for the cache shell
//!
//! Every command answers with exactly one of these, serialized as a JSON line.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{CacheEntry, CacheStats, ExpiryPolicy};

/// One answer line.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Entry(EntryResponse),
    Empty(EmptyResponse),
    Removed(RemoveResponse),
    Keys(KeysResponse),
    Purged(PurgeResponse),
    Stats(StatsResponse),
    Capacity(CapacityResponse),
    Message(MessageResponse),
    Error(ErrorResponse),
}

/// A cache entry as seen by the caller
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub key: String,
    pub value: String,
    /// Absolute expiry, None = never expires. Expiries past the last
    /// representable date are shown as that date.
    pub expires_at: Option<DateTime<Utc>>,
    /// Absolute expiry in Unix milliseconds, exact
    pub expires_at_ms: Option<u64>,
    /// Whether the TTL has elapsed; the entry may still be cached
    pub expired: bool,
}

impl EntryResponse {
    pub fn from_entry(entry: &CacheEntry<String, String>) -> Self {
        Self {
            key: entry.key().clone(),
            value: entry.value().clone(),
            expires_at: entry.expires_at().map(|ms| {
                i64::try_from(ms)
                    .ok()
                    .and_then(DateTime::from_timestamp_millis)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC)
            }),
            expires_at_ms: entry.expires_at(),
            expired: entry.is_expired(),
        }
    }
}

/// Answer to `head`/`tail` on an empty cache
#[derive(Debug, Clone, Serialize)]
pub struct EmptyResponse {
    pub entry: Option<EntryResponse>,
}

/// Response body for `del`
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    /// Success message
    pub message: String,
    /// The key that was removed
    pub key: String,
    /// The value it held
    pub value: String,
}

impl RemoveResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' removed", key),
            key,
            value: value.into(),
        }
    }
}

/// Keys from most to least recently used
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub keys: Vec<String>,
}

/// Response body for `purge`
#[derive(Debug, Clone, Serialize)]
pub struct PurgeResponse {
    /// Number of expired entries removed
    pub removed: usize,
}

/// Response body for `stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    pub capacity: usize,
    pub expiry_policy: ExpiryPolicy,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, capacity: usize, expiry_policy: ExpiryPolicy) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            capacity,
            expiry_policy,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for `capacity`
#[derive(Debug, Clone, Serialize)]
pub struct CapacityResponse {
    pub capacity: usize,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error response body for all recoverable error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
