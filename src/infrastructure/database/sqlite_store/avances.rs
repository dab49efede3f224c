use super::SqliteStore;
use super::mapper::map_avance_row;
use super::queries::{
    CLEAR_AVANCES, COUNT_AVANCES, DELETE_AVANCE, INSERT_AVANCE, INSERT_QUEUE_ENTRY,
    MARK_AVANCE_SYNCED, SELECT_AVANCES_BY_TAREA, SELECT_AVANCE_BY_LOCAL_ID,
    SELECT_AVANCE_BY_OFFLINE_ID, SELECT_UNSYNCED_AVANCES, UPDATE_AVANCE,
};
use crate::application::ports::AvanceRepository;
use crate::domain::entities::{Avance, SyncQueueEntry};
use crate::domain::value_objects::SyncOperation;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl AvanceRepository for SqliteStore {
    async fn crear_avance_offline(
        &self,
        avance: &Avance,
    ) -> Result<(Avance, SyncQueueEntry), AppError> {
        let operation = SyncOperation::CrearAvance {
            offline_id: avance.offline_id.clone(),
            tarea_id: avance.tarea_id,
            descripcion: avance.descripcion.clone(),
            porcentaje: avance.porcentaje,
        };
        let payload = operation.to_payload()?;
        let tipo = operation.kind().as_str();
        let now = Utc::now();

        let mut tx = self.pool.get_pool().begin().await?;

        let inserted = sqlx::query(INSERT_AVANCE)
            .bind(&avance.offline_id)
            .bind(avance.server_id)
            .bind(avance.tarea_id)
            .bind(&avance.descripcion)
            .bind(avance.porcentaje)
            .bind(avance.synced)
            .bind(avance.created_at.timestamp_millis())
            .execute(&mut *tx)
            .await?;
        let local_id = inserted.last_insert_rowid();

        let queued = sqlx::query(INSERT_QUEUE_ENTRY)
            .bind(tipo)
            .bind(&payload)
            .bind(now.timestamp_millis())
            .bind(now.timestamp_millis())
            .execute(&mut *tx)
            .await?;
        let entry_id = queued.last_insert_rowid();

        tx.commit().await?;

        let mut stored = avance.clone();
        stored.local_id = Some(local_id);

        let entry = SyncQueueEntry {
            id: entry_id,
            tipo: tipo.to_string(),
            payload,
            retry_count: 0,
            next_attempt_at: now,
            last_error: None,
            created_at: now,
        };

        Ok((stored, entry))
    }

    async fn get_avance(&self, local_id: i64) -> Result<Option<Avance>, AppError> {
        let row = sqlx::query(SELECT_AVANCE_BY_LOCAL_ID)
            .bind(local_id)
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => Ok(Some(map_avance_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_avance_by_offline_id(
        &self,
        offline_id: &str,
    ) -> Result<Option<Avance>, AppError> {
        let row = sqlx::query(SELECT_AVANCE_BY_OFFLINE_ID)
            .bind(offline_id)
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => Ok(Some(map_avance_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_avances_by_tarea(&self, tarea_id: i64) -> Result<Vec<Avance>, AppError> {
        let rows = sqlx::query(SELECT_AVANCES_BY_TAREA)
            .bind(tarea_id)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut avances = Vec::with_capacity(rows.len());
        for row in rows {
            avances.push(map_avance_row(&row)?);
        }

        Ok(avances)
    }

    async fn get_unsynced_avances(&self) -> Result<Vec<Avance>, AppError> {
        let rows = sqlx::query(SELECT_UNSYNCED_AVANCES)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut avances = Vec::with_capacity(rows.len());
        for row in rows {
            avances.push(map_avance_row(&row)?);
        }

        Ok(avances)
    }

    async fn put_avance(&self, avance: &Avance) -> Result<Avance, AppError> {
        let mut stored = avance.clone();

        match avance.local_id {
            Some(local_id) => {
                sqlx::query(UPDATE_AVANCE)
                    .bind(local_id)
                    .bind(&avance.offline_id)
                    .bind(avance.server_id)
                    .bind(avance.tarea_id)
                    .bind(&avance.descripcion)
                    .bind(avance.porcentaje)
                    .bind(avance.synced)
                    .bind(avance.created_at.timestamp_millis())
                    .execute(self.pool.get_pool())
                    .await?;
            }
            None => {
                let inserted = sqlx::query(INSERT_AVANCE)
                    .bind(&avance.offline_id)
                    .bind(avance.server_id)
                    .bind(avance.tarea_id)
                    .bind(&avance.descripcion)
                    .bind(avance.porcentaje)
                    .bind(avance.synced)
                    .bind(avance.created_at.timestamp_millis())
                    .execute(self.pool.get_pool())
                    .await?;
                stored.local_id = Some(inserted.last_insert_rowid());
            }
        }

        Ok(stored)
    }

    async fn mark_avance_synced(
        &self,
        offline_id: &str,
        server_id: i64,
    ) -> Result<(), AppError> {
        sqlx::query(MARK_AVANCE_SYNCED)
            .bind(offline_id)
            .bind(server_id)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn delete_avance(&self, local_id: i64) -> Result<(), AppError> {
        sqlx::query(DELETE_AVANCE)
            .bind(local_id)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn count_avances(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar(COUNT_AVANCES)
            .fetch_one(self.pool.get_pool())
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn clear_avances(&self) -> Result<(), AppError> {
        sqlx::query(CLEAR_AVANCES)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }
}
