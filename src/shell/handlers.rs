//! Shell Handlers
//!
//! Executes parsed commands against the shared cache.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    CapacityResponse, EmptyResponse, EntryResponse, KeysResponse, MessageResponse, PurgeResponse,
    RemoveResponse, Request, Response, StatsResponse,
};

/// The cache as shared by a session.
pub type SharedCache = Arc<RwLock<CacheStore<String, String>>>;

/// Application state shared across all handlers.
///
/// A `RwLock` guards the whole cache. Mutating commands and `get` take the
/// write lock (a hit reorders the recency list). `peek`, `head`, `tail`,
/// `keys`, `stats` and `capacity` share the read lock.
#[derive(Clone)]
pub struct AppState {
    pub cache: SharedCache,
}

impl AppState {
    pub fn new(cache: CacheStore<String, String>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Initializes the cache store with parameters from the Config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheStore::from_config(config))
    }
}

/// Dispatches one request. `Quit` is answered with a farewell message; the
/// session decides whether to stop.
pub async fn handle(state: &AppState, request: Request) -> Result<Response> {
    match request {
        Request::Put { key, value, ttl } => put_handler(state, key, value, ttl).await,
        Request::Get { key } => get_handler(state, &key).await,
        Request::Peek { key } => peek_handler(state, &key).await,
        Request::Delete { key } => delete_handler(state, &key).await,
        Request::Head => Ok(head_handler(state).await),
        Request::Tail => Ok(tail_handler(state).await),
        Request::Keys => Ok(keys_handler(state).await),
        Request::Purge => Ok(purge_handler(state).await),
        Request::Stats => Ok(stats_handler(state).await),
        Request::Capacity => {
            let cache = state.cache.read().await;
            Ok(Response::Capacity(CapacityResponse {
                capacity: cache.capacity(),
            }))
        }
        Request::Clear => {
            state.cache.write().await.clear();
            Ok(Response::Message(MessageResponse::new("Cache cleared")))
        }
        Request::Quit => Ok(Response::Message(MessageResponse::new("Bye"))),
    }
}

/// Stores a value; an unusable ttl is passed through and ignored by the cache.
pub async fn put_handler(
    state: &AppState,
    key: String,
    value: String,
    ttl: Option<std::time::Duration>,
) -> Result<Response> {
    let mut cache = state.cache.write().await;
    match cache.put(key, value, ttl) {
        Some(entry) => Ok(Response::Entry(EntryResponse::from_entry(entry))),
        None => Ok(Response::Message(MessageResponse::new(
            "Cache has zero capacity; nothing stored",
        ))),
    }
}

/// Looks up a key and marks it most recently used.
pub async fn get_handler(state: &AppState, key: &str) -> Result<Response> {
    let mut cache = state.cache.write().await;
    cache
        .get(key)
        .map(|entry| Response::Entry(EntryResponse::from_entry(entry)))
        .ok_or_else(|| CacheError::NotFound(key.to_string()))
}

pub async fn peek_handler(state: &AppState, key: &str) -> Result<Response> {
    let cache = state.cache.read().await;
    cache
        .peek(key)
        .map(|entry| Response::Entry(EntryResponse::from_entry(entry)))
        .ok_or_else(|| CacheError::NotFound(key.to_string()))
}

pub async fn delete_handler(state: &AppState, key: &str) -> Result<Response> {
    let mut cache = state.cache.write().await;
    cache
        .remove(key)
        .map(|value| Response::Removed(RemoveResponse::new(key, value)))
        .ok_or_else(|| CacheError::NotFound(key.to_string()))
}

pub async fn head_handler(state: &AppState) -> Response {
    let cache = state.cache.read().await;
    entry_or_empty(cache.head())
}

pub async fn tail_handler(state: &AppState) -> Response {
    let cache = state.cache.read().await;
    entry_or_empty(cache.tail())
}

pub async fn keys_handler(state: &AppState) -> Response {
    let cache = state.cache.read().await;
    Response::Keys(KeysResponse {
        keys: cache.keys().cloned().collect(),
    })
}

/// Explicitly removes expired entries; nothing else ever does.
pub async fn purge_handler(state: &AppState) -> Response {
    let mut cache = state.cache.write().await;
    Response::Purged(PurgeResponse {
        removed: cache.purge_expired(),
    })
}

pub async fn stats_handler(state: &AppState) -> Response {
    let cache = state.cache.read().await;
    Response::Stats(StatsResponse::new(
        &cache.stats(),
        cache.capacity(),
        cache.policy(),
    ))
}

fn entry_or_empty(entry: Option<&crate::cache::CacheEntry<String, String>>) -> Response {
    match entry {
        Some(entry) => Response::Entry(EntryResponse::from_entry(entry)),
        None => Response::Empty(EmptyResponse { entry: None }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ExpiryPolicy;
    use std::time::Duration;

    fn put(key: &str, value: &str) -> Request {
        Request::Put {
            key: key.to_string(),
            value: value.to_string(),
            ttl: None,
        }
    }

    fn entry_key(response: &Response) -> &str {
        match response {
            Response::Entry(entry) => &entry.key,
            other => panic!("expected entry, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_put_and_get_handler() {
        let state = AppState::new(CacheStore::new(100));

        handle(&state, put("test_key", "test_value")).await.unwrap();

        let response = get_handler(&state, "test_key").await.unwrap();
        match response {
            Response::Entry(entry) => {
                assert_eq!(entry.value, "test_value");
                assert!(entry.expires_at.is_none());
            }
            other => panic!("expected entry, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = AppState::new(CacheStore::new(100));

        let result = get_handler(&state, "nonexistent").await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = AppState::new(CacheStore::new(100));
        handle(&state, put("to_delete", "value")).await.unwrap();

        let result = delete_handler(&state, "to_delete").await;
        assert!(matches!(result, Ok(Response::Removed(_))));

        let result = get_handler(&state, "to_delete").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_head_and_tail_follow_recency() {
        let state = AppState::new(CacheStore::new(2));
        for (k, v) in [("a", "1"), ("b", "2"), ("c", "3")] {
            handle(&state, put(k, v)).await.unwrap();
        }

        assert_eq!(entry_key(&head_handler(&state).await), "c");
        assert_eq!(entry_key(&tail_handler(&state).await), "b");

        get_handler(&state, "b").await.unwrap();
        handle(&state, put("d", "4")).await.unwrap();

        match keys_handler(&state).await {
            Response::Keys(keys) => assert_eq!(keys.keys, vec!["d", "b"]),
            other => panic!("expected keys, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_head_on_empty_cache() {
        let state = AppState::new(CacheStore::new(2));
        assert!(matches!(
            head_handler(&state).await,
            Response::Empty(EmptyResponse { entry: None })
        ));
    }

    #[tokio::test]
    async fn test_purge_handler() {
        let state = AppState::new(CacheStore::new(10));
        handle(
            &state,
            Request::Put {
                key: "short".to_string(),
                value: "v".to_string(),
                ttl: Some(Duration::from_millis(1)),
            },
        )
        .await
        .unwrap();
        handle(&state, put("long", "v")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(matches!(
            purge_handler(&state).await,
            Response::Purged(PurgeResponse { removed: 1 })
        ));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = AppState::from_config(&Config {
            capacity: 5,
            expiry_policy: ExpiryPolicy::EvictOnAccess,
        });
        handle(&state, put("a", "1")).await.unwrap();
        let _ = get_handler(&state, "a").await;
        let _ = get_handler(&state, "zzz").await;

        match stats_handler(&state).await {
            Response::Stats(stats) => {
                assert_eq!(stats.hits, 1);
                assert_eq!(stats.misses, 1);
                assert_eq!(stats.capacity, 5);
                assert_eq!(stats.expiry_policy, ExpiryPolicy::EvictOnAccess);
            }
            other => panic!("expected stats, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_zero_capacity_put() {
        let state = AppState::new(CacheStore::new(0));
        let response = handle(&state, put("a", "1")).await.unwrap();
        assert!(matches!(response, Response::Message(_)));
    }
}
