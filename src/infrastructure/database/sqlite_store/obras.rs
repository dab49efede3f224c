use super::SqliteStore;
use super::mapper::map_obra_row;
use super::queries::{
    CLEAR_OBRAS, COUNT_OBRAS, DELETE_OBRA, SEARCH_OBRAS, SELECT_ALL_OBRAS, SELECT_OBRAS_BY_ESTADO,
    SELECT_OBRA_BY_ID, UPSERT_OBRA,
};
use crate::application::ports::ObraRepository;
use crate::domain::entities::Obra;
use crate::shared::error::AppError;
use async_trait::async_trait;

#[async_trait]
impl ObraRepository for SqliteStore {
    async fn get_obra(&self, id: i64) -> Result<Option<Obra>, AppError> {
        let row = sqlx::query(SELECT_OBRA_BY_ID)
            .bind(id)
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => Ok(Some(map_obra_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_all_obras(&self) -> Result<Vec<Obra>, AppError> {
        let rows = sqlx::query(SELECT_ALL_OBRAS)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut obras = Vec::with_capacity(rows.len());
        for row in rows {
            obras.push(map_obra_row(&row)?);
        }

        Ok(obras)
    }

    async fn get_obras_by_estado(&self, estado: &str) -> Result<Vec<Obra>, AppError> {
        let rows = sqlx::query(SELECT_OBRAS_BY_ESTADO)
            .bind(estado)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut obras = Vec::with_capacity(rows.len());
        for row in rows {
            obras.push(map_obra_row(&row)?);
        }

        Ok(obras)
    }

    async fn search_obras(&self, query: &str) -> Result<Vec<Obra>, AppError> {
        let pattern = format!("%{}%", query);
        let rows = sqlx::query(SEARCH_OBRAS)
            .bind(&pattern)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut obras = Vec::with_capacity(rows.len());
        for row in rows {
            obras.push(map_obra_row(&row)?);
        }

        Ok(obras)
    }

    async fn put_obra(&self, obra: &Obra) -> Result<(), AppError> {
        sqlx::query(UPSERT_OBRA)
            .bind(obra.id)
            .bind(&obra.nombre)
            .bind(&obra.estado)
            .bind(obra.updated_at.timestamp_millis())
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn put_obras_many(&self, obras: &[Obra]) -> Result<(), AppError> {
        let mut tx = self.pool.get_pool().begin().await?;

        for obra in obras {
            sqlx::query(UPSERT_OBRA)
                .bind(obra.id)
                .bind(&obra.nombre)
                .bind(&obra.estado)
                .bind(obra.updated_at.timestamp_millis())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn replace_obras(&self, obras: &[Obra]) -> Result<(), AppError> {
        let mut tx = self.pool.get_pool().begin().await?;

        sqlx::query(CLEAR_OBRAS).execute(&mut *tx).await?;
        for obra in obras {
            sqlx::query(UPSERT_OBRA)
                .bind(obra.id)
                .bind(&obra.nombre)
                .bind(&obra.estado)
                .bind(obra.updated_at.timestamp_millis())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_obra(&self, id: i64) -> Result<(), AppError> {
        sqlx::query(DELETE_OBRA)
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn count_obras(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar(COUNT_OBRAS)
            .fetch_one(self.pool.get_pool())
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn clear_obras(&self) -> Result<(), AppError> {
        sqlx::query(CLEAR_OBRAS)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }
}
