//! Key-value store abstraction.
//!
//! The service only needs a handful of Redis-style primitives: string values,
//! integer counters, sets and flat hashes. Each operation is atomic on its own;
//! there are no cross-key transactions. Two backends implement the trait:
//! Redis for deployments and SQLite for local runs and tests.

pub mod keys;
mod redis;
mod sqlite;

pub use self::redis::RedisStore;
pub use self::sqlite::SqliteStore;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::StoreBackend;
use crate::errors::AppError;

/// Redis-style key-value operations used by the repositories.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read a string value.
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Overwrite a string value.
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Increment an integer counter, treating a missing key as 0. Returns the new value.
    async fn incr(&self, key: &str) -> Result<i64, AppError>;

    /// Delete a key of any type.
    async fn del(&self, key: &str) -> Result<(), AppError>;

    /// Add a member to a set. Returns `true` if the member was not present before.
    async fn sadd(&self, key: &str, member: &str) -> Result<bool, AppError>;

    /// Remove a member from a set. Returns `true` if it was present.
    async fn srem(&self, key: &str, member: &str) -> Result<bool, AppError>;

    async fn sismember(&self, key: &str, member: &str) -> Result<bool, AppError>;

    async fn smembers(&self, key: &str) -> Result<Vec<String>, AppError>;

    /// Set several hash fields at once.
    async fn hset(&self, key: &str, fields: &[(&str, String)]) -> Result<(), AppError>;

    /// Read every field of a hash. A missing key yields an empty map.
    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, AppError>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}

/// Shared handle used by every repository.
pub type SharedStore = Arc<dyn KvStore>;

/// Connect to the configured backend.
pub async fn open_store(backend: &StoreBackend) -> Result<SharedStore, AppError> {
    match backend {
        StoreBackend::Redis(url) => Ok(Arc::new(RedisStore::connect(url).await?)),
        StoreBackend::Sqlite(path) => Ok(Arc::new(SqliteStore::open(path).await?)),
    }
}

/// Read an integer counter, treating missing or non-numeric values as 0.
pub async fn get_count(store: &dyn KvStore, key: &str) -> Result<u64, AppError> {
    Ok(store
        .get(key)
        .await?
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(|v| v.max(0) as u64)
        .unwrap_or(0))
}
