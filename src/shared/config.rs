use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub inventario_limit: u32,
    pub request_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub auto_sync: bool,
    pub sync_interval: u64,
    pub max_retries: u32,
    pub backoff_base: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: default_database_url(),
                max_connections: 5,
                connection_timeout: 30,
            },
            api: ApiConfig {
                base_url: "http://localhost:8000".to_string(),
                inventario_limit: 1000,
                request_timeout: 30,
            },
            sync: SyncConfig {
                auto_sync: true,
                sync_interval: 300, // 5 minutes
                max_retries: 3,
                backoff_base: 30, // seconds, doubled per retry
            },
        }
    }
}

fn default_database_url() -> String {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    format!(
        "sqlite://{}?mode=rwc",
        base.join("obyra").join("obyra.db").display()
    )
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("OBYRA_DATABASE_URL") {
            if !v.trim().is_empty() {
                cfg.database.url = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("OBYRA_DATABASE_MAX_CONNECTIONS") {
            if let Some(value) = parse_u32(&v) {
                cfg.database.max_connections = value.max(1);
            }
        }

        if let Ok(v) = std::env::var("OBYRA_API_BASE_URL") {
            if !v.trim().is_empty() {
                cfg.api.base_url = v.trim().trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = std::env::var("OBYRA_INVENTARIO_LIMIT") {
            if let Some(value) = parse_u32(&v) {
                cfg.api.inventario_limit = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("OBYRA_REQUEST_TIMEOUT") {
            if let Some(value) = parse_u64(&v) {
                cfg.api.request_timeout = value.max(1);
            }
        }

        if let Ok(v) = std::env::var("OBYRA_AUTO_SYNC") {
            cfg.sync.auto_sync = parse_bool(&v, cfg.sync.auto_sync);
        }
        if let Ok(v) = std::env::var("OBYRA_SYNC_INTERVAL") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.sync_interval = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("OBYRA_MAX_RETRIES") {
            if let Some(value) = parse_u32(&v) {
                cfg.sync.max_retries = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("OBYRA_BACKOFF_BASE") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.backoff_base = value.max(1);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.is_empty() {
            return Err("Database url must not be empty".to_string());
        }
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }
        if self.api.base_url.is_empty() {
            return Err("Api base_url must not be empty".to_string());
        }
        if self.api.inventario_limit == 0 {
            return Err("Api inventario_limit must be greater than 0".to_string());
        }
        if self.sync.sync_interval == 0 {
            return Err("Sync sync_interval must be greater than 0".to_string());
        }
        if self.sync.max_retries == 0 {
            return Err("Sync max_retries must be greater than 0".to_string());
        }
        if self.sync.backoff_base == 0 {
            return Err("Sync backoff_base must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}
