pub mod contact_list_repository;
pub mod group_repository;
pub mod mail_log_repository;
pub mod memory;
pub mod session_repository;
pub mod template_repository;
pub mod user_repository;

pub use contact_list_repository::*;
pub use group_repository::*;
pub use mail_log_repository::*;
pub use memory::MemoryStore;
pub use session_repository::*;
pub use template_repository::*;
pub use user_repository::*;

use std::sync::Arc;

use deadpool_redis::{Config as RedisConfig, Pool, Runtime};
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{Config, StoreBackend};
use crate::error::{AppError, Result};

/// Create a Redis connection pool
pub fn create_pool(config: &Config) -> Result<Pool> {
    let redis_config = RedisConfig::from_url(&config.redis_url);
    let pool = redis_config
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| AppError::StoreError(format!("Failed to create Redis pool: {}", e)))?;

    Ok(pool)
}

/// Build the document store selected by `STORE_BACKEND`.
pub fn create_store(config: &Config) -> Result<Store> {
    match config.store_backend {
        StoreBackend::Redis => Ok(Store::Redis(create_pool(config)?)),
        StoreBackend::Memory => Ok(Store::memory()),
    }
}

/// Document store handle shared by every repository.
///
/// Records are JSON documents kept in hashes (keyed by id or natural key) or
/// in append-only lists. The in-memory backend mirrors the Redis semantics so
/// repositories behave the same against either.
#[derive(Clone)]
pub enum Store {
    Redis(Pool),
    Memory(Arc<MemoryStore>),
}

impl Store {
    pub fn memory() -> Self {
        Store::Memory(Arc::new(MemoryStore::default()))
    }

    pub async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>> {
        match self {
            Store::Redis(pool) => {
                let mut conn = pool.get().await?;
                let value: Option<String> = conn.hget(key, field).await?;
                Ok(value)
            }
            Store::Memory(mem) => Ok(mem.hash_get(key, field)),
        }
    }

    pub async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<()> {
        match self {
            Store::Redis(pool) => {
                let mut conn = pool.get().await?;
                conn.hset::<_, _, _, ()>(key, field, value).await?;
                Ok(())
            }
            Store::Memory(mem) => {
                mem.hash_set(key, field, value);
                Ok(())
            }
        }
    }

    /// Insert only if `field` is absent. Returns whether the value was written.
    pub async fn hash_set_nx(&self, key: &str, field: &str, value: &str) -> Result<bool> {
        match self {
            Store::Redis(pool) => {
                let mut conn = pool.get().await?;
                let created: bool = conn.hset_nx(key, field, value).await?;
                Ok(created)
            }
            Store::Memory(mem) => Ok(mem.hash_set_nx(key, field, value)),
        }
    }

    /// Remove `field`. Returns whether anything was removed.
    pub async fn hash_del(&self, key: &str, field: &str) -> Result<bool> {
        match self {
            Store::Redis(pool) => {
                let mut conn = pool.get().await?;
                let removed: usize = conn.hdel(key, field).await?;
                Ok(removed > 0)
            }
            Store::Memory(mem) => Ok(mem.hash_del(key, field)),
        }
    }

    pub async fn hash_values(&self, key: &str) -> Result<Vec<String>> {
        match self {
            Store::Redis(pool) => {
                let mut conn = pool.get().await?;
                let values: Vec<String> = conn.hvals(key).await?;
                Ok(values)
            }
            Store::Memory(mem) => Ok(mem.hash_values(key)),
        }
    }

    pub async fn list_push(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Store::Redis(pool) => {
                let mut conn = pool.get().await?;
                conn.rpush::<_, _, ()>(key, value).await?;
                Ok(())
            }
            Store::Memory(mem) => {
                mem.list_push(key, value);
                Ok(())
            }
        }
    }

    pub async fn list_all(&self, key: &str) -> Result<Vec<String>> {
        match self {
            Store::Redis(pool) => {
                let mut conn = pool.get().await?;
                let values: Vec<String> = conn.lrange(key, 0, -1).await?;
                Ok(values)
            }
            Store::Memory(mem) => Ok(mem.list_all(key)),
        }
    }

    /// Check store connection health
    pub async fn health_check(&self) -> Result<bool> {
        match self {
            Store::Redis(pool) => {
                let mut conn = pool.get().await?;

                let pong: String = redis::cmd("PING")
                    .query_async(&mut *conn)
                    .await
                    .map_err(|e| AppError::StoreError(e.to_string()))?;

                Ok(pong == "PONG")
            }
            Store::Memory(_) => Ok(true),
        }
    }
}

pub(crate) fn encode<T: Serialize>(doc: &T) -> Result<String> {
    serde_json::to_string(doc)
        .map_err(|e| AppError::StoreError(format!("Failed to encode document: {}", e)))
}

pub(crate) fn decode<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json)
        .map_err(|e| AppError::StoreError(format!("Corrupt document: {}", e)))
}

pub(crate) fn decode_all<T: DeserializeOwned>(docs: Vec<String>) -> Result<Vec<T>> {
    docs.iter().map(|doc| decode(doc)).collect()
}
