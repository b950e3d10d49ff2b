//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;

use crate::cache::{ExpiryPolicy, DEFAULT_CAPACITY};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Whether `get` removes entries it finds expired
    pub expiry_policy: ExpiryPolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 10). Values that
    ///   are not a non-negative integer fall back to the default; `0` is kept
    ///   and produces a cache that stores nothing.
    /// - `CACHE_EXPIRY_POLICY` - `lazy` or `evict-on-access` (default: lazy)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            capacity: lookup("CACHE_CAPACITY")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),
            expiry_policy: lookup("CACHE_EXPIRY_POLICY")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            expiry_policy: ExpiryPolicy::default(),
        }
    }
}
