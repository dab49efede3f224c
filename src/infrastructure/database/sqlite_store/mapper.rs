use crate::domain::entities::{
    Avance, DeadLetter, FotoPendiente, InventarioItem, Obra, SyncQueueEntry, Tarea, Usuario,
};
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};
use sqlx::{Row, sqlite::SqliteRow};

pub(super) fn timestamp(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
}

pub(super) fn map_obra_row(row: &SqliteRow) -> Result<Obra, AppError> {
    Ok(Obra {
        id: row.try_get("id")?,
        nombre: row.try_get("nombre")?,
        estado: row.try_get("estado")?,
        updated_at: timestamp(row.try_get("updated_at")?),
    })
}

pub(super) fn map_tarea_row(row: &SqliteRow) -> Result<Tarea, AppError> {
    Ok(Tarea {
        id: row.try_get("id")?,
        obra_id: row.try_get("obra_id")?,
        nombre: row.try_get("nombre")?,
        estado: row.try_get("estado")?,
        asignado_a: row.try_get("asignado_a")?,
        updated_at: timestamp(row.try_get("updated_at")?),
    })
}

pub(super) fn map_avance_row(row: &SqliteRow) -> Result<Avance, AppError> {
    Ok(Avance {
        local_id: Some(row.try_get("local_id")?),
        offline_id: row.try_get("offline_id")?,
        server_id: row.try_get("server_id")?,
        tarea_id: row.try_get("tarea_id")?,
        descripcion: row.try_get("descripcion")?,
        porcentaje: row.try_get("porcentaje")?,
        synced: row.try_get("synced")?,
        created_at: timestamp(row.try_get("created_at")?),
    })
}

pub(super) fn map_item_row(row: &SqliteRow) -> Result<InventarioItem, AppError> {
    Ok(InventarioItem {
        id: row.try_get("id")?,
        codigo: row.try_get("codigo")?,
        categoria_id: row.try_get("categoria_id")?,
        nombre: row.try_get("nombre")?,
        updated_at: timestamp(row.try_get("updated_at")?),
    })
}

pub(super) fn map_usuario_row(row: &SqliteRow) -> Result<Usuario, AppError> {
    Ok(Usuario {
        id: row.try_get("id")?,
        nombre: row.try_get("nombre")?,
        email: row.try_get("email")?,
        rol: row.try_get("rol")?,
        updated_at: timestamp(row.try_get("updated_at")?),
    })
}

pub(super) fn map_foto_row(row: &SqliteRow) -> Result<FotoPendiente, AppError> {
    Ok(FotoPendiente {
        id: Some(row.try_get("id")?),
        avance_id: row.try_get("avance_id")?,
        filename: row.try_get("filename")?,
        mime_type: row.try_get("mime_type")?,
        datos: row.try_get("datos")?,
        synced: row.try_get("synced")?,
        created_at: timestamp(row.try_get("created_at")?),
    })
}

pub(super) fn map_queue_row(row: &SqliteRow) -> Result<SyncQueueEntry, AppError> {
    let retry_count: i64 = row.try_get("retry_count")?;
    Ok(SyncQueueEntry {
        id: row.try_get("id")?,
        tipo: row.try_get("tipo")?,
        payload: row.try_get("payload")?,
        retry_count: u32::try_from(retry_count.max(0)).unwrap_or(u32::MAX),
        next_attempt_at: timestamp(row.try_get("next_attempt_at")?),
        last_error: row.try_get("last_error")?,
        created_at: timestamp(row.try_get("created_at")?),
    })
}

pub(super) fn map_dead_letter_row(row: &SqliteRow) -> Result<DeadLetter, AppError> {
    let retry_count: i64 = row.try_get("retry_count")?;
    Ok(DeadLetter {
        id: Some(row.try_get("id")?),
        queue_id: row.try_get("queue_id")?,
        tipo: row.try_get("tipo")?,
        payload: row.try_get("payload")?,
        retry_count: u32::try_from(retry_count.max(0)).unwrap_or(u32::MAX),
        last_error: row.try_get("last_error")?,
        created_at: timestamp(row.try_get("created_at")?),
        dead_at: timestamp(row.try_get("dead_at")?),
    })
}
