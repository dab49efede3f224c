use super::ConnectionPool;
use crate::application::ports::Store;
use crate::shared::error::AppError;
use async_trait::async_trait;

mod avances;
mod config;
mod fotos;
mod inventario;
mod mapper;
mod obras;
mod queries;
mod response_cache;
mod sync_queue;
mod tareas;
mod usuarios;

/// SQLite-backed implementation of every collection repository. One struct,
/// one impl block per collection.
pub struct SqliteStore {
    pool: ConnectionPool,
}

impl SqliteStore {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn initialize(&self) -> Result<(), AppError> {
        self.pool.migrate().await
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        let result = sqlx::query("SELECT 1")
            .fetch_one(self.pool.get_pool())
            .await;
        Ok(result.is_ok())
    }
}
