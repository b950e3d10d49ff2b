//! Cache Module
//!
//! Bounded in-memory caching with LRU eviction and lazy TTL expiration.

mod entry;
mod lru;
mod policy;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry, EntryId};
pub use lru::RecencyList;
pub use policy::ExpiryPolicy;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Capacity used when none (or an unusable one) is configured
pub const DEFAULT_CAPACITY: usize = 10;
