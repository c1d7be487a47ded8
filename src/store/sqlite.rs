//! SQLite backend emulating the Redis key spaces.
//!
//! Strings, sets and hashes each live in their own table. Single statements
//! are atomic, which is all the trait promises.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use super::KvStore;
use crate::errors::AppError;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database file and run migrations.
    pub async fn open(db_path: &Path) -> Result<Self, AppError> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let options = SqliteConnectOptions::from_str(&db_url)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        run_migrations(&pool).await?;

        Ok(Self { pool })
    }
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS kv_strings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS kv_sets (
            key TEXT NOT NULL,
            member TEXT NOT NULL,
            PRIMARY KEY (key, member)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS kv_hashes (
            key TEXT NOT NULL,
            field TEXT NOT NULL,
            value TEXT NOT NULL,
            PRIMARY KEY (key, field)
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[async_trait]
impl KvStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT value FROM kv_strings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO kv_strings (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64, AppError> {
        let row = sqlx::query(
            "INSERT INTO kv_strings (key, value) VALUES (?, '1') \
             ON CONFLICT(key) DO UPDATE SET value = CAST(value AS INTEGER) + 1 \
             RETURNING CAST(value AS INTEGER) AS value",
        )
        .bind(key)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("value"))
    }

    async fn del(&self, key: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for table in ["kv_strings", "kv_sets", "kv_hashes"] {
            sqlx::query(&format!("DELETE FROM {} WHERE key = ?", table))
                .bind(key)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool, AppError> {
        let result = sqlx::query("INSERT OR IGNORE INTO kv_sets (key, member) VALUES (?, ?)")
            .bind(key)
            .bind(member)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn srem(&self, key: &str, member: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM kv_sets WHERE key = ? AND member = ?")
            .bind(key)
            .bind(member)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn sismember(&self, key: &str, member: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT 1 AS present FROM kv_sets WHERE key = ? AND member = ?")
            .bind(key)
            .bind(member)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query("SELECT member FROM kv_sets WHERE key = ? ORDER BY member")
            .bind(key)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|r| r.get("member")).collect())
    }

    async fn hset(&self, key: &str, fields: &[(&str, String)]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for (field, value) in fields {
            sqlx::query(
                "INSERT INTO kv_hashes (key, field, value) VALUES (?, ?, ?) \
                 ON CONFLICT(key, field) DO UPDATE SET value = excluded.value",
            )
            .bind(key)
            .bind(*field)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, AppError> {
        let rows = sqlx::query("SELECT field, value FROM kv_hashes WHERE key = ?")
            .bind(key)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| (r.get("field"), r.get("value")))
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
