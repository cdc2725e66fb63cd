use serde_json::Value;
use std::time::Duration;

/// Failures of the cache backing store. `NotFound` means the key has
/// never been collected; callers must not treat it like a backend
/// failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} has not been collected yet")]
    NotFound(String),

    #[error("cache operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to encode or decode cached value: {0}")]
    Codec(#[from] serde_json::Error),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

// === impl StoreError ===

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Cache backing store: a key/value service holding whole serialized
/// collections. A put replaces the previous value for the key; there is
/// no merging and no expiry.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn get(&self, key: &str) -> Result<Value, StoreError>;
    async fn put(&self, key: &str, value: &Value) -> Result<(), StoreError>;
}
