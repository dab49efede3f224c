use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::application::ports::{
    ConfigRepository, InventarioRepository, ObraRepository, RemoteApi, TareaRepository,
};
use crate::shared::error::AppError;

/// Outcome of one bulk download pass. Collections that failed stay `None`
/// and contribute a message to `errors`; the rest carry the row count of
/// the snapshot that replaced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DownloadSummary {
    pub obras: Option<u64>,
    pub tareas: Option<u64>,
    pub inventario: Option<u64>,
    pub errors: Vec<String>,
}

impl DownloadSummary {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Full-replace download of the read-only collections. Always fetches
/// everything; the recorded timestamps are bookkeeping, never used for
/// delta fetching.
pub struct DownloadService {
    api: Arc<dyn RemoteApi>,
    obras: Arc<dyn ObraRepository>,
    tareas: Arc<dyn TareaRepository>,
    inventario: Arc<dyn InventarioRepository>,
    config: Arc<dyn ConfigRepository>,
    inventario_limit: u32,
}

impl DownloadService {
    pub fn new(
        api: Arc<dyn RemoteApi>,
        obras: Arc<dyn ObraRepository>,
        tareas: Arc<dyn TareaRepository>,
        inventario: Arc<dyn InventarioRepository>,
        config: Arc<dyn ConfigRepository>,
        inventario_limit: u32,
    ) -> Self {
        Self {
            api,
            obras,
            tareas,
            inventario,
            config,
            inventario_limit,
        }
    }

    /// Replaces obras, tareas and inventario with the server's current
    /// snapshots. The three downloads run concurrently and fail
    /// independently; one collection erroring never blocks the others.
    pub async fn refresh_all(&self) -> DownloadSummary {
        let (obras, tareas, inventario) = futures::join!(
            self.refresh_obras(),
            self.refresh_tareas(),
            self.refresh_inventario()
        );

        let mut summary = DownloadSummary::default();
        match obras {
            Ok(count) => summary.obras = Some(count),
            Err(e) => {
                error!("Bulk download of obras failed: {}", e);
                summary.errors.push(format!("obras: {e}"));
            }
        }
        match tareas {
            Ok(count) => summary.tareas = Some(count),
            Err(e) => {
                error!("Bulk download of tareas failed: {}", e);
                summary.errors.push(format!("tareas: {e}"));
            }
        }
        match inventario {
            Ok(count) => summary.inventario = Some(count),
            Err(e) => {
                error!("Bulk download of inventario failed: {}", e);
                summary.errors.push(format!("inventario: {e}"));
            }
        }

        info!(
            "Bulk download finished: obras={:?} tareas={:?} inventario={:?} errors={}",
            summary.obras,
            summary.tareas,
            summary.inventario,
            summary.errors.len()
        );
        summary
    }

    async fn refresh_obras(&self) -> Result<u64, AppError> {
        let obras = self.api.descargar_obras().await?;
        self.obras.replace_obras(&obras).await?;
        self.stamp("obras").await;
        Ok(obras.len() as u64)
    }

    async fn refresh_tareas(&self) -> Result<u64, AppError> {
        let tareas = self.api.descargar_tareas().await?;
        self.tareas.replace_tareas(&tareas).await?;
        self.stamp("tareas").await;
        Ok(tareas.len() as u64)
    }

    async fn refresh_inventario(&self) -> Result<u64, AppError> {
        let items = self.api.descargar_inventario(self.inventario_limit).await?;
        self.inventario.replace_inventario(&items).await?;
        self.stamp("inventario").await;
        Ok(items.len() as u64)
    }

    /// Records when a collection was last replaced. Informational, so a
    /// failed write is logged and swallowed.
    async fn stamp(&self, tipo: &str) {
        let clave = format!("ultima_descarga:{tipo}");
        let valor = Utc::now().timestamp().to_string();
        if let Err(e) = self.config.set_config(&clave, &valor).await {
            warn!("Failed to record {}: {}", clave, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::Store;
    use crate::domain::entities::{Avance, FotoPendiente, InventarioItem, Obra, Tarea};
    use crate::domain::value_objects::TareaUpdate;
    use crate::infrastructure::database::{ConnectionPool, SqliteStore};
    use async_trait::async_trait;
    use mockall::{mock, predicate::*};

    mock! {
        pub Api {}

        #[async_trait]
        impl RemoteApi for Api {
            async fn descargar_obras(&self) -> Result<Vec<Obra>, AppError>;
            async fn descargar_tareas(&self) -> Result<Vec<Tarea>, AppError>;
            async fn descargar_inventario(&self, limit: u32) -> Result<Vec<InventarioItem>, AppError>;
            async fn crear_avance(&self, avance: &Avance) -> Result<i64, AppError>;
            async fn actualizar_tarea(&self, tarea_id: i64, cambios: &TareaUpdate) -> Result<(), AppError>;
            async fn subir_foto(&self, avance_id: i64, foto: &FotoPendiente) -> Result<(), AppError>;
            async fn get_json(&self, path: &str) -> Result<String, AppError>;
        }
    }

    async fn setup_store() -> Arc<SqliteStore> {
        let pool = ConnectionPool::from_memory()
            .await
            .expect("open in-memory store");
        let store = SqliteStore::new(pool);
        store.initialize().await.expect("run migrations");
        Arc::new(store)
    }

    fn service_with(api: MockApi, store: &Arc<SqliteStore>, limit: u32) -> DownloadService {
        DownloadService::new(
            Arc::new(api),
            Arc::clone(store) as Arc<dyn ObraRepository>,
            Arc::clone(store) as Arc<dyn TareaRepository>,
            Arc::clone(store) as Arc<dyn InventarioRepository>,
            Arc::clone(store) as Arc<dyn ConfigRepository>,
            limit,
        )
    }

    fn obra(id: i64) -> Obra {
        Obra {
            id,
            nombre: format!("Obra {id}"),
            estado: "activa".to_string(),
            updated_at: Utc::now(),
        }
    }

    fn tarea(id: i64, obra_id: i64) -> Tarea {
        Tarea {
            id,
            obra_id,
            nombre: format!("Tarea {id}"),
            estado: "pendiente".to_string(),
            asignado_a: None,
            updated_at: Utc::now(),
        }
    }

    fn item(id: i64) -> InventarioItem {
        InventarioItem {
            id,
            codigo: format!("MAT-{id:04}"),
            categoria_id: Some(1),
            nombre: format!("Material {id}"),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn refresh_all_replaces_every_collection() {
        let store = setup_store().await;
        store.put_obra(&obra(99)).await.expect("seed stale obra");

        let mut api = MockApi::new();
        api.expect_descargar_obras()
            .times(1)
            .returning(|| Ok(vec![obra(1), obra(2)]));
        api.expect_descargar_tareas()
            .times(1)
            .returning(|| Ok(vec![tarea(10, 1)]));
        api.expect_descargar_inventario()
            .times(1)
            .returning(|_| Ok(vec![item(100), item(101), item(102)]));

        let service = service_with(api, &store, 1000);
        let summary = service.refresh_all().await;

        assert!(summary.is_complete());
        assert_eq!(summary.obras, Some(2));
        assert_eq!(summary.tareas, Some(1));
        assert_eq!(summary.inventario, Some(3));

        // Full replace: the stale row is gone, not merged.
        assert_eq!(store.count_obras().await.expect("count"), 2);
        assert!(store.get_obra(99).await.expect("lookup").is_none());
        assert!(store
            .get_config("ultima_descarga:obras")
            .await
            .expect("config lookup")
            .is_some());
    }

    #[tokio::test]
    async fn one_failure_leaves_other_collections_fresh() {
        let store = setup_store().await;
        store.put_obra(&obra(99)).await.expect("seed obra");

        let mut api = MockApi::new();
        api.expect_descargar_obras()
            .times(1)
            .returning(|| Err(AppError::Network("connection reset".to_string())));
        api.expect_descargar_tareas()
            .times(1)
            .returning(|| Ok(vec![tarea(10, 1), tarea(11, 1)]));
        api.expect_descargar_inventario()
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service_with(api, &store, 1000);
        let summary = service.refresh_all().await;

        assert!(!summary.is_complete());
        assert_eq!(summary.obras, None);
        assert_eq!(summary.tareas, Some(2));
        assert_eq!(summary.errors.len(), 1);

        // The failed collection keeps its previous contents.
        assert!(store.get_obra(99).await.expect("lookup").is_some());
        assert_eq!(store.count_tareas().await.expect("count"), 2);
        assert!(store
            .get_config("ultima_descarga:obras")
            .await
            .expect("config lookup")
            .is_none());
    }

    #[tokio::test]
    async fn inventario_limit_is_forwarded() {
        let store = setup_store().await;

        let mut api = MockApi::new();
        api.expect_descargar_obras().returning(|| Ok(vec![]));
        api.expect_descargar_tareas().returning(|| Ok(vec![]));
        api.expect_descargar_inventario()
            .with(eq(500u32))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service_with(api, &store, 500);
        let summary = service.refresh_all().await;
        assert!(summary.is_complete());
    }
}
