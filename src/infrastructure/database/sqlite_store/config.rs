use super::SqliteStore;
use super::queries::{DELETE_CONFIG, SELECT_CONFIG, UPSERT_CONFIG};
use crate::application::ports::ConfigRepository;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

#[async_trait]
impl ConfigRepository for SqliteStore {
    async fn get_config(&self, clave: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query(SELECT_CONFIG)
            .bind(clave)
            .fetch_optional(self.pool.get_pool())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(row.try_get("valor")?))
    }

    async fn set_config(&self, clave: &str, valor: &str) -> Result<(), AppError> {
        sqlx::query(UPSERT_CONFIG)
            .bind(clave)
            .bind(valor)
            .bind(Utc::now().timestamp_millis())
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn delete_config(&self, clave: &str) -> Result<(), AppError> {
        sqlx::query(DELETE_CONFIG)
            .bind(clave)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }
}
