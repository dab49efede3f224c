use super::SqliteStore;
use super::mapper::{map_dead_letter_row, map_queue_row};
use super::queries::{
    COUNT_QUEUE, DELETE_QUEUE_ENTRY, INSERT_DEAD_LETTER, INSERT_QUEUE_ENTRY,
    RECORD_QUEUE_FAILURE, SELECT_DEAD_LETTERS, SELECT_PENDING_ENTRIES,
};
use crate::application::ports::SyncQueueRepository;
use crate::domain::entities::{DeadLetter, SyncQueueEntry};
use crate::domain::value_objects::SyncOperation;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl SyncQueueRepository for SqliteStore {
    async fn enqueue(&self, operation: &SyncOperation) -> Result<SyncQueueEntry, AppError> {
        let payload = operation.to_payload()?;
        let tipo = operation.kind().as_str();
        let now = Utc::now();

        let inserted = sqlx::query(INSERT_QUEUE_ENTRY)
            .bind(tipo)
            .bind(&payload)
            .bind(now.timestamp_millis())
            .bind(now.timestamp_millis())
            .execute(self.pool.get_pool())
            .await?;

        Ok(SyncQueueEntry {
            id: inserted.last_insert_rowid(),
            tipo: tipo.to_string(),
            payload,
            retry_count: 0,
            next_attempt_at: now,
            last_error: None,
            created_at: now,
        })
    }

    async fn pending_entries(&self) -> Result<Vec<SyncQueueEntry>, AppError> {
        let rows = sqlx::query(SELECT_PENDING_ENTRIES)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(map_queue_row(&row)?);
        }

        Ok(entries)
    }

    async fn acknowledge(&self, entry_id: i64) -> Result<(), AppError> {
        // Deleting an absent id affects zero rows, which is exactly the
        // idempotence the replay loop relies on.
        sqlx::query(DELETE_QUEUE_ENTRY)
            .bind(entry_id)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn record_failure(
        &self,
        entry_id: i64,
        error: &str,
        next_attempt_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(RECORD_QUEUE_FAILURE)
            .bind(entry_id)
            .bind(next_attempt_at.timestamp_millis())
            .bind(error)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn dead_letter(&self, entry: &SyncQueueEntry, error: &str) -> Result<(), AppError> {
        let dead_at = Utc::now();
        let mut tx = self.pool.get_pool().begin().await?;

        sqlx::query(INSERT_DEAD_LETTER)
            .bind(entry.id)
            .bind(&entry.tipo)
            .bind(&entry.payload)
            .bind(entry.retry_count as i64)
            .bind(error)
            .bind(entry.created_at.timestamp_millis())
            .bind(dead_at.timestamp_millis())
            .execute(&mut *tx)
            .await?;

        sqlx::query(DELETE_QUEUE_ENTRY)
            .bind(entry.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn count_pending(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar(COUNT_QUEUE)
            .fetch_one(self.pool.get_pool())
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn list_dead_letters(&self) -> Result<Vec<DeadLetter>, AppError> {
        let rows = sqlx::query(SELECT_DEAD_LETTERS)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut letters = Vec::with_capacity(rows.len());
        for row in rows {
            letters.push(map_dead_letter_row(&row)?);
        }

        Ok(letters)
    }
}
