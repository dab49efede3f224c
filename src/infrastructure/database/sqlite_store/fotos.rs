use super::SqliteStore;
use super::mapper::map_foto_row;
use super::queries::{
    CLEAR_FOTOS, COUNT_FOTOS, DELETE_FOTO, INSERT_FOTO, INSERT_QUEUE_ENTRY, MARK_FOTO_SYNCED,
    SELECT_FOTOS_BY_AVANCE, SELECT_FOTOS_PENDIENTES, SELECT_FOTO_BY_ID,
};
use crate::application::ports::FotoRepository;
use crate::domain::entities::{FotoPendiente, SyncQueueEntry};
use crate::domain::value_objects::SyncOperation;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl FotoRepository for SqliteStore {
    async fn guardar_foto_offline(
        &self,
        foto: &FotoPendiente,
    ) -> Result<(FotoPendiente, SyncQueueEntry), AppError> {
        let now = Utc::now();
        let mut tx = self.pool.get_pool().begin().await?;

        let inserted = sqlx::query(INSERT_FOTO)
            .bind(foto.avance_id)
            .bind(&foto.filename)
            .bind(&foto.mime_type)
            .bind(foto.datos.as_slice())
            .bind(foto.synced)
            .bind(foto.created_at.timestamp_millis())
            .execute(&mut *tx)
            .await?;
        let foto_id = inserted.last_insert_rowid();

        // The payload can only reference the row once its id exists, so the
        // queue entry is built inside the same transaction.
        let operation = SyncOperation::SubirFoto { foto_id };
        let payload = operation.to_payload()?;
        let tipo = operation.kind().as_str();

        let queued = sqlx::query(INSERT_QUEUE_ENTRY)
            .bind(tipo)
            .bind(&payload)
            .bind(now.timestamp_millis())
            .bind(now.timestamp_millis())
            .execute(&mut *tx)
            .await?;
        let entry_id = queued.last_insert_rowid();

        tx.commit().await?;

        let mut stored = foto.clone();
        stored.id = Some(foto_id);

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

    async fn get_foto(&self, id: i64) -> Result<Option<FotoPendiente>, AppError> {
        let row = sqlx::query(SELECT_FOTO_BY_ID)
            .bind(id)
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => Ok(Some(map_foto_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_fotos_by_avance(&self, avance_id: i64) -> Result<Vec<FotoPendiente>, AppError> {
        let rows = sqlx::query(SELECT_FOTOS_BY_AVANCE)
            .bind(avance_id)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut fotos = Vec::with_capacity(rows.len());
        for row in rows {
            fotos.push(map_foto_row(&row)?);
        }

        Ok(fotos)
    }

    async fn get_fotos_pendientes(&self) -> Result<Vec<FotoPendiente>, AppError> {
        let rows = sqlx::query(SELECT_FOTOS_PENDIENTES)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut fotos = Vec::with_capacity(rows.len());
        for row in rows {
            fotos.push(map_foto_row(&row)?);
        }

        Ok(fotos)
    }

    async fn mark_foto_synced(&self, id: i64) -> Result<(), AppError> {
        sqlx::query(MARK_FOTO_SYNCED)
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn delete_foto(&self, id: i64) -> Result<(), AppError> {
        sqlx::query(DELETE_FOTO)
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn count_fotos(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar(COUNT_FOTOS)
            .fetch_one(self.pool.get_pool())
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn clear_fotos(&self) -> Result<(), AppError> {
        sqlx::query(CLEAR_FOTOS)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }
}
