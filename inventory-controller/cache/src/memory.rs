use parking_lot::RwLock;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};

use inventory_controller_core::{Store, StoreError};

/// In-process store with the same contract as [`RedisStore`], used as
/// the cache test double across the workspace.
///
/// [`RedisStore`]: crate::RedisStore
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<RwLock<HashMap<String, Value>>>);

// === impl MemoryStore ===

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Value, StoreError> {
        self.0
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn put(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.0.write().insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn round_trips_nested_structures() {
        let store = MemoryStore::new();
        let value = json!({
            "items": [
                {"metadata": {"labels": {"tier": "db"}}, "spec": {"replicas": 3}},
                {"metadata": {"labels": null}},
            ],
            "scalars": [1, 2.5, "three", true, null],
        });
        store.put("default_pods", &value).await.unwrap();
        assert_eq!(store.get("default_pods").await.unwrap(), value);
    }

    #[tokio::test]
    async fn a_miss_is_not_found_rather_than_a_failure() {
        let store = MemoryStore::new();
        let err = store.get("default_jobs").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn put_replaces_the_whole_value() {
        let store = MemoryStore::new();
        store.put("k", &json!([1, 2, 3])).await.unwrap();
        store.put("k", &json!([4])).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), json!([4]));
    }
}
