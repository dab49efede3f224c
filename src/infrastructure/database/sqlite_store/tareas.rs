use super::SqliteStore;
use super::mapper::map_tarea_row;
use super::queries::{
    CLEAR_TAREAS, COUNT_TAREAS, DELETE_TAREA, SELECT_ALL_TAREAS, SELECT_TAREAS_BY_ASIGNADO,
    SELECT_TAREAS_BY_ESTADO, SELECT_TAREAS_BY_OBRA, SELECT_TAREA_BY_ID, UPSERT_TAREA,
};
use crate::application::ports::TareaRepository;
use crate::domain::entities::Tarea;
use crate::shared::error::AppError;
use async_trait::async_trait;
use sqlx::Sqlite;
use sqlx::sqlite::SqliteRow;

async fn upsert_tarea<'e, E>(executor: E, tarea: &Tarea) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(UPSERT_TAREA)
        .bind(tarea.id)
        .bind(tarea.obra_id)
        .bind(&tarea.nombre)
        .bind(&tarea.estado)
        .bind(tarea.asignado_a.as_deref())
        .bind(tarea.updated_at.timestamp_millis())
        .execute(executor)
        .await?;
    Ok(())
}

fn map_rows(rows: Vec<SqliteRow>) -> Result<Vec<Tarea>, AppError> {
    let mut tareas = Vec::with_capacity(rows.len());
    for row in rows {
        tareas.push(map_tarea_row(&row)?);
    }
    Ok(tareas)
}

#[async_trait]
impl TareaRepository for SqliteStore {
    async fn get_tarea(&self, id: i64) -> Result<Option<Tarea>, AppError> {
        let row = sqlx::query(SELECT_TAREA_BY_ID)
            .bind(id)
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => Ok(Some(map_tarea_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_all_tareas(&self) -> Result<Vec<Tarea>, AppError> {
        let rows = sqlx::query(SELECT_ALL_TAREAS)
            .fetch_all(self.pool.get_pool())
            .await?;
        map_rows(rows)
    }

    async fn get_tareas_by_obra(&self, obra_id: i64) -> Result<Vec<Tarea>, AppError> {
        let rows = sqlx::query(SELECT_TAREAS_BY_OBRA)
            .bind(obra_id)
            .fetch_all(self.pool.get_pool())
            .await?;
        map_rows(rows)
    }

    async fn get_tareas_by_estado(&self, estado: &str) -> Result<Vec<Tarea>, AppError> {
        let rows = sqlx::query(SELECT_TAREAS_BY_ESTADO)
            .bind(estado)
            .fetch_all(self.pool.get_pool())
            .await?;
        map_rows(rows)
    }

    async fn get_tareas_by_asignado(&self, asignado_a: &str) -> Result<Vec<Tarea>, AppError> {
        let rows = sqlx::query(SELECT_TAREAS_BY_ASIGNADO)
            .bind(asignado_a)
            .fetch_all(self.pool.get_pool())
            .await?;
        map_rows(rows)
    }

    async fn put_tarea(&self, tarea: &Tarea) -> Result<(), AppError> {
        upsert_tarea(self.pool.get_pool(), tarea).await?;
        Ok(())
    }

    async fn put_tareas_many(&self, tareas: &[Tarea]) -> Result<(), AppError> {
        let mut tx = self.pool.get_pool().begin().await?;

        for tarea in tareas {
            upsert_tarea(&mut *tx, tarea).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn replace_tareas(&self, tareas: &[Tarea]) -> Result<(), AppError> {
        let mut tx = self.pool.get_pool().begin().await?;

        sqlx::query(CLEAR_TAREAS).execute(&mut *tx).await?;
        for tarea in tareas {
            upsert_tarea(&mut *tx, tarea).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_tarea(&self, id: i64) -> Result<(), AppError> {
        sqlx::query(DELETE_TAREA)
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn count_tareas(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar(COUNT_TAREAS)
            .fetch_one(self.pool.get_pool())
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn clear_tareas(&self) -> Result<(), AppError> {
        sqlx::query(CLEAR_TAREAS)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }
}
