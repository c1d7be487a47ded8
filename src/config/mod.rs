//! Configuration module for the poll backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Which key-value backend the service talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Redis server at the given connection URL
    Redis(String),
    /// Local SQLite file emulating the key-value store
    Sqlite(PathBuf),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key-value store backend
    pub store: StoreBackend,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Public base URL used when building frame image and post URLs
    pub site_url: String,
    /// Pre-shared key guarding the admin endpoints (open when unset)
    pub admin_psk: Option<String>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let store = match env::var("VOTE_REDIS_URL") {
            Ok(url) if !url.trim().is_empty() => StoreBackend::Redis(url),
            _ => StoreBackend::Sqlite(
                env::var("VOTE_DB_PATH")
                    .unwrap_or_else(|_| "./data/votes.sqlite".to_string())
                    .into(),
            ),
        };

        let bind_addr = env::var("VOTE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid VOTE_BIND_ADDR format");

        let site_url = normalize_site_url(
            &env::var("VOTE_SITE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
        );

        let admin_psk = env::var("VOTE_ADMIN_PSK").ok().filter(|s| !s.is_empty());

        let log_level = env::var("VOTE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            store,
            bind_addr,
            site_url,
            admin_psk,
            log_level,
        }
    }
}

fn normalize_site_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
