use super::SqliteStore;
use super::mapper::timestamp;
use super::queries::{CLEAR_RESPONSE_CACHE, SELECT_CACHED_RESPONSE, UPSERT_CACHED_RESPONSE};
use crate::application::ports::{CachedResponse, ResponseCacheRepository};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

#[async_trait]
impl ResponseCacheRepository for SqliteStore {
    async fn get_cached(&self, cache_key: &str) -> Result<Option<CachedResponse>, AppError> {
        let row = sqlx::query(SELECT_CACHED_RESPONSE)
            .bind(cache_key)
            .fetch_optional(self.pool.get_pool())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(CachedResponse {
            body: row.try_get("body")?,
            fetched_at: timestamp(row.try_get("fetched_at")?),
        }))
    }

    async fn put_cached(&self, cache_key: &str, body: &str) -> Result<(), AppError> {
        sqlx::query(UPSERT_CACHED_RESPONSE)
            .bind(cache_key)
            .bind(body)
            .bind(Utc::now().timestamp_millis())
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn clear_cache(&self) -> Result<(), AppError> {
        sqlx::query(CLEAR_RESPONSE_CACHE)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }
}
