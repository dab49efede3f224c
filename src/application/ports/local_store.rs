use crate::domain::entities::{
    Avance, DeadLetter, FotoPendiente, InventarioItem, Obra, SyncQueueEntry, Tarea, Usuario,
};
use crate::domain::value_objects::SyncOperation;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait Store: Send + Sync {
    /// Opens the schema, applying pending migrations.
    async fn initialize(&self) -> Result<(), AppError>;
    async fn health_check(&self) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ObraRepository: Send + Sync {
    async fn get_obra(&self, id: i64) -> Result<Option<Obra>, AppError>;
    async fn get_all_obras(&self) -> Result<Vec<Obra>, AppError>;
    async fn get_obras_by_estado(&self, estado: &str) -> Result<Vec<Obra>, AppError>;
    async fn search_obras(&self, query: &str) -> Result<Vec<Obra>, AppError>;
    async fn put_obra(&self, obra: &Obra) -> Result<(), AppError>;
    async fn put_obras_many(&self, obras: &[Obra]) -> Result<(), AppError>;
    async fn replace_obras(&self, obras: &[Obra]) -> Result<(), AppError>;
    async fn delete_obra(&self, id: i64) -> Result<(), AppError>;
    async fn count_obras(&self) -> Result<u64, AppError>;
    async fn clear_obras(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait TareaRepository: Send + Sync {
    async fn get_tarea(&self, id: i64) -> Result<Option<Tarea>, AppError>;
    async fn get_all_tareas(&self) -> Result<Vec<Tarea>, AppError>;
    async fn get_tareas_by_obra(&self, obra_id: i64) -> Result<Vec<Tarea>, AppError>;
    async fn get_tareas_by_estado(&self, estado: &str) -> Result<Vec<Tarea>, AppError>;
    async fn get_tareas_by_asignado(&self, asignado_a: &str) -> Result<Vec<Tarea>, AppError>;
    async fn put_tarea(&self, tarea: &Tarea) -> Result<(), AppError>;
    async fn put_tareas_many(&self, tareas: &[Tarea]) -> Result<(), AppError>;
    async fn replace_tareas(&self, tareas: &[Tarea]) -> Result<(), AppError>;
    async fn delete_tarea(&self, id: i64) -> Result<(), AppError>;
    async fn count_tareas(&self) -> Result<u64, AppError>;
    async fn clear_tareas(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait AvanceRepository: Send + Sync {
    /// Inserts the avance and its create-avance queue entry in one
    /// transaction. Either both land or neither does.
    async fn crear_avance_offline(
        &self,
        avance: &Avance,
    ) -> Result<(Avance, SyncQueueEntry), AppError>;
    async fn get_avance(&self, local_id: i64) -> Result<Option<Avance>, AppError>;
    async fn get_avance_by_offline_id(&self, offline_id: &str)
        -> Result<Option<Avance>, AppError>;
    async fn get_avances_by_tarea(&self, tarea_id: i64) -> Result<Vec<Avance>, AppError>;
    async fn get_unsynced_avances(&self) -> Result<Vec<Avance>, AppError>;
    async fn put_avance(&self, avance: &Avance) -> Result<Avance, AppError>;
    async fn mark_avance_synced(&self, offline_id: &str, server_id: i64)
        -> Result<(), AppError>;
    async fn delete_avance(&self, local_id: i64) -> Result<(), AppError>;
    async fn count_avances(&self) -> Result<u64, AppError>;
    async fn clear_avances(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait FotoRepository: Send + Sync {
    /// Inserts the foto and its upload-photo queue entry in one transaction.
    async fn guardar_foto_offline(
        &self,
        foto: &FotoPendiente,
    ) -> Result<(FotoPendiente, SyncQueueEntry), AppError>;
    async fn get_foto(&self, id: i64) -> Result<Option<FotoPendiente>, AppError>;
    async fn get_fotos_by_avance(&self, avance_id: i64) -> Result<Vec<FotoPendiente>, AppError>;
    async fn get_fotos_pendientes(&self) -> Result<Vec<FotoPendiente>, AppError>;
    async fn mark_foto_synced(&self, id: i64) -> Result<(), AppError>;
    async fn delete_foto(&self, id: i64) -> Result<(), AppError>;
    async fn count_fotos(&self) -> Result<u64, AppError>;
    async fn clear_fotos(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait InventarioRepository: Send + Sync {
    async fn get_item(&self, id: i64) -> Result<Option<InventarioItem>, AppError>;
    async fn get_all_items(&self) -> Result<Vec<InventarioItem>, AppError>;
    async fn get_items_by_categoria(
        &self,
        categoria_id: i64,
    ) -> Result<Vec<InventarioItem>, AppError>;
    async fn search_inventario(&self, query: &str) -> Result<Vec<InventarioItem>, AppError>;
    async fn put_items_many(&self, items: &[InventarioItem]) -> Result<(), AppError>;
    async fn replace_inventario(&self, items: &[InventarioItem]) -> Result<(), AppError>;
    async fn count_items(&self) -> Result<u64, AppError>;
    async fn clear_inventario(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    async fn get_usuario(&self, id: i64) -> Result<Option<Usuario>, AppError>;
    async fn get_all_usuarios(&self) -> Result<Vec<Usuario>, AppError>;
    async fn put_usuario(&self, usuario: &Usuario) -> Result<(), AppError>;
    async fn put_usuarios_many(&self, usuarios: &[Usuario]) -> Result<(), AppError>;
    async fn delete_usuario(&self, id: i64) -> Result<(), AppError>;
    async fn count_usuarios(&self) -> Result<u64, AppError>;
    async fn clear_usuarios(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait SyncQueueRepository: Send + Sync {
    async fn enqueue(&self, operation: &SyncOperation) -> Result<SyncQueueEntry, AppError>;
    /// All queued entries ordered by id ascending, oldest first.
    async fn pending_entries(&self) -> Result<Vec<SyncQueueEntry>, AppError>;
    /// Removes an acknowledged entry. Deleting an already-absent id is a
    /// no-op, not an error.
    async fn acknowledge(&self, entry_id: i64) -> Result<(), AppError>;
    async fn record_failure(
        &self,
        entry_id: i64,
        error: &str,
        next_attempt_at: DateTime<Utc>,
    ) -> Result<(), AppError>;
    /// Moves the entry out of the queue into the dead-letter collection.
    async fn dead_letter(&self, entry: &SyncQueueEntry, error: &str) -> Result<(), AppError>;
    async fn count_pending(&self) -> Result<u64, AppError>;
    async fn list_dead_letters(&self) -> Result<Vec<DeadLetter>, AppError>;
}

#[async_trait]
pub trait ConfigRepository: Send + Sync {
    async fn get_config(&self, clave: &str) -> Result<Option<String>, AppError>;
    async fn set_config(&self, clave: &str, valor: &str) -> Result<(), AppError>;
    async fn delete_config(&self, clave: &str) -> Result<(), AppError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

#[async_trait]
pub trait ResponseCacheRepository: Send + Sync {
    async fn get_cached(&self, cache_key: &str) -> Result<Option<CachedResponse>, AppError>;
    async fn put_cached(&self, cache_key: &str, body: &str) -> Result<(), AppError>;
    async fn clear_cache(&self) -> Result<(), AppError>;
}
