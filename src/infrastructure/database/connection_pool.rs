use crate::shared::error::AppError;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct ConnectionPool {
    pool: Arc<SqlitePool>,
}

impl ConnectionPool {
    /// Opens (creating on first use) the local database. Failure to open
    /// surfaces as StoreUnavailable so callers can degrade to online-only
    /// behavior instead of crashing.
    pub async fn open(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        if let Some(path) = file_path_of(database_url) {
            if let Some(parent) = Path::new(path).parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        info!("Local store connected: {}", database_url);

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    pub async fn from_memory() -> Result<Self, AppError> {
        Self::open(":memory:", 1).await
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(self.pool.as_ref())
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        info!("Local store migrations completed");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn file_path_of(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let rest = rest.split('?').next()?;
    if rest.is_empty() || rest == ":memory:" {
        return None;
    }
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_path_of_strips_scheme_and_params() {
        assert_eq!(
            file_path_of("sqlite:///tmp/obyra/obyra.db?mode=rwc"),
            Some("/tmp/obyra/obyra.db")
        );
        assert_eq!(file_path_of("sqlite::memory:"), None);
        assert_eq!(file_path_of(":memory:"), None);
    }

    #[tokio::test]
    async fn test_open_creates_database_file() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let pool = ConnectionPool::open(&db_url, 1).await.unwrap();
        pool.migrate().await.unwrap();

        assert!(db_path.exists());
        pool.close().await;
    }

    #[tokio::test]
    async fn test_from_memory_migrates() {
        let pool = ConnectionPool::from_memory().await.unwrap();
        pool.migrate().await.unwrap();

        let row = sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name='sync_queue'")
            .fetch_optional(pool.get_pool())
            .await
            .unwrap();
        assert!(row.is_some());

        pool.close().await;
    }
}
