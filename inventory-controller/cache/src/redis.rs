use ::redis::{aio::ConnectionManager, AsyncCommands};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

use inventory_controller_core::{Store, StoreError};

/// Bound on every cache operation so a slow or unavailable redis
/// cannot stall a collector tick or a serving request.
const OP_TIMEOUT: Duration = Duration::from_secs(5);

/// Redis-backed inventory cache. Values are whole JSON-serialized
/// collections; a put replaces the previous value for the key.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

// === impl RedisStore ===

impl RedisStore {
    /// Connects a managed connection that reconnects on failure.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let client = ::redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { conn })
    }
}

#[async_trait::async_trait]
impl Store for RedisStore {
    async fn get(&self, key: &str) -> Result<Value, StoreError> {
        let mut conn = self.conn.clone();
        let bytes = match tokio::time::timeout(OP_TIMEOUT, conn.get::<_, Option<Vec<u8>>>(key))
            .await
        {
            Err(_) => return Err(StoreError::Timeout(OP_TIMEOUT)),
            Ok(Err(error)) => return Err(StoreError::Backend(error.into())),
            Ok(Ok(bytes)) => bytes,
        };
        match bytes {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => {
                warn!(%key, "not present in the cache yet");
                Err(StoreError::NotFound(key.to_string()))
            }
        }
    }

    async fn put(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        let mut conn = self.conn.clone();
        match tokio::time::timeout(OP_TIMEOUT, conn.set::<_, _, ()>(key, bytes)).await {
            Err(_) => Err(StoreError::Timeout(OP_TIMEOUT)),
            Ok(Err(error)) => Err(StoreError::Backend(error.into())),
            Ok(Ok(())) => Ok(()),
        }
    }
}
