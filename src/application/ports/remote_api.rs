use crate::domain::entities::{Avance, FotoPendiente, InventarioItem, Obra, Tarea};
use crate::domain::value_objects::TareaUpdate;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// The OBYRA backend as seen from the sync core. Everything behind these
/// methods (auth, rate limiting, schema) is the server's business.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    async fn descargar_obras(&self) -> Result<Vec<Obra>, AppError>;
    async fn descargar_tareas(&self) -> Result<Vec<Tarea>, AppError>;
    async fn descargar_inventario(&self, limit: u32) -> Result<Vec<InventarioItem>, AppError>;
    /// Returns the server-assigned avance id.
    async fn crear_avance(&self, avance: &Avance) -> Result<i64, AppError>;
    async fn actualizar_tarea(&self, tarea_id: i64, cambios: &TareaUpdate)
        -> Result<(), AppError>;
    async fn subir_foto(&self, avance_id: i64, foto: &FotoPendiente) -> Result<(), AppError>;
    /// Raw GET for the worker bridge's cache-then-network reads. Returns the
    /// response body on a 2xx status.
    async fn get_json(&self, path: &str) -> Result<String, AppError>;
}
