use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

/// Keyed store for fetched backend data.
///
/// Passed explicitly to whatever loads data so each caller (and each test) decides
/// which cache it shares.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<Value>;
    async fn set(&self, key: &str, value: Value);
    async fn invalidate(&self, key: &str);
    async fn clear(&self);
}

#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: Value) {
        self.entries.write().await.insert(key.to_string(), value);
    }

    async fn invalidate(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl CacheStore for NoopCache {
    async fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    async fn set(&self, _key: &str, _value: Value) {}

    async fn invalidate(&self, _key: &str) {}

    async fn clear(&self) {}
}

pub mod keys {
    pub const MY_ENROLLMENTS: &str = "getMyEnrollments";

    pub fn course(course_id: &str) -> String {
        format!("getCourse-{course_id}")
    }

    pub fn course_enrollments(course_id: &str) -> String {
        format!("getCourseEnrollments-{course_id}")
    }

    pub fn user(user_id: &str) -> String {
        format!("getUser-{user_id}")
    }
}

/// Returns the cached value for `key`, or runs `fetch` and caches a successful result.
///
/// Errors are never cached. An entry that no longer decodes as `T` is dropped and
/// fetched again.
pub async fn cached_fetch<T, E, F, Fut>(cache: &dyn CacheStore, key: &str, fetch: F) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if let Some(value) = cache.get(key).await {
        match serde_json::from_value::<T>(value) {
            Ok(hit) => {
                tracing::debug!(key, "Cache hit");
                return Ok(hit);
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "Dropping undecodable cache entry");
                cache.invalidate(key).await;
            }
        }
    }

    let fresh = fetch().await?;
    match serde_json::to_value(&fresh) {
        Ok(value) => cache.set(key, value).await,
        Err(err) => tracing::warn!(key, error = %err, "Failed to cache fetched value"),
    }

    Ok(fresh)
}
