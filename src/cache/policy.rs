//! Expiry Policy Module
//!
//! Decides what a lookup does with an entry whose TTL has elapsed.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CacheError;

// == Expiry Policy ==
/// How `CacheStore::get` treats expired entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryPolicy {
    /// Expired entries are returned like live ones; callers check
    /// `CacheEntry::is_expired` themselves. Only capacity pressure or an
    /// explicit removal reclaims them.
    #[default]
    Lazy,
    /// A `get` that lands on an expired entry removes it and reports a miss.
    EvictOnAccess,
}

impl ExpiryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryPolicy::Lazy => "lazy",
            ExpiryPolicy::EvictOnAccess => "evict-on-access",
        }
    }
}

impl fmt::Display for ExpiryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpiryPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lazy" => Ok(ExpiryPolicy::Lazy),
            "evict-on-access" | "evict_on_access" => Ok(ExpiryPolicy::EvictOnAccess),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown expiry policy '{}'",
                other
            ))),
        }
    }
}
