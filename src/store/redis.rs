//! Redis backend.
//!
//! Every command goes through a cloned `ConnectionManager`, which multiplexes
//! a single connection and reconnects on failure.

use std::collections::HashMap;

use ::redis::{aio::ConnectionManager, AsyncCommands, Client};
use async_trait::async_trait;

use super::KvStore;
use crate::errors::AppError;

#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Open a managed connection to the server at `url`.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.conn.clone();
        Ok(conn.get::<_, Option<String>>(key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64, AppError> {
        let mut conn = self.conn.clone();
        Ok(conn.incr::<_, _, i64>(key, 1).await?)
    }

    async fn del(&self, key: &str) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();
        let added: i64 = conn.sadd(key, member).await?;
        Ok(added > 0)
    }

    async fn srem(&self, key: &str, member: &str) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.srem(key, member).await?;
        Ok(removed > 0)
    }

    async fn sismember(&self, key: &str, member: &str) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();
        Ok(conn.sismember::<_, _, bool>(key, member).await?)
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, AppError> {
        let mut conn = self.conn.clone();
        Ok(conn.smembers::<_, Vec<String>>(key).await?)
    }

    async fn hset(&self, key: &str, fields: &[(&str, String)]) -> Result<(), AppError> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        conn.hset_multiple::<_, _, _, ()>(key, fields).await?;
        Ok(())
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, AppError> {
        let mut conn = self.conn.clone();
        Ok(conn.hgetall::<_, HashMap<String, String>>(key).await?)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
