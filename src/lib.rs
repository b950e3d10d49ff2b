//! Mini LRU - A bounded in-memory cache
//!
//! Provides an LRU-evicting key/value store with optional per-entry TTL,
//! plus a line-oriented shell for driving it.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod shell;

pub use cache::{CacheEntry, CacheStore, ExpiryPolicy};
pub use config::Config;
pub use error::{CacheError, Result};
pub use shell::AppState;
