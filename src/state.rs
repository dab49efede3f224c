use std::sync::Arc;

use crate::application::ports::{
    AvanceRepository, ConfigRepository, FotoRepository, InventarioRepository, ObraRepository,
    RemoteApi, ResponseCacheRepository, Store, SyncQueueRepository, TareaRepository,
};
use crate::application::services::{
    AvanceService, DownloadService, SyncService, TareaService,
};
use crate::infrastructure::api::RestClient;
use crate::infrastructure::connectivity::ConnectivityMonitor;
use crate::infrastructure::database::{ConnectionPool, SqliteStore};
use crate::infrastructure::worker::SyncWorkerBridge;
use crate::presentation::EventBus;
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;

/// Everything the engine owns, wired once at startup and handed to the
/// host shell. Cloning shares the underlying services.
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub pool: ConnectionPool,
    pub store: Arc<SqliteStore>,
    pub api: Arc<dyn RemoteApi>,
    pub monitor: ConnectivityMonitor,
    pub events: EventBus,
    pub avances: Arc<AvanceService>,
    pub tareas: Arc<TareaService>,
    pub descargas: Arc<DownloadService>,
    pub sync: Arc<SyncService>,
    pub bridge: Arc<SyncWorkerBridge>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Opens the local store and wires every service against the real
    /// HTTP client.
    pub async fn init(config: AppConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::Config)?;
        let api: Arc<dyn RemoteApi> = Arc::new(RestClient::new(&config.api)?);
        Self::init_with_api(config, api).await
    }

    /// Same wiring with the remote seam injected. Lets tests and tooling
    /// run the full engine against a scripted server.
    pub async fn init_with_api(
        config: AppConfig,
        api: Arc<dyn RemoteApi>,
    ) -> Result<Self, AppError> {
        let pool =
            ConnectionPool::open(&config.database.url, config.database.max_connections).await?;
        let store = Arc::new(SqliteStore::new(pool.clone()));
        store.initialize().await?;

        let events = EventBus::new();
        // Assume online until the host reports otherwise; a wrong guess
        // just means the first direct attempt falls back to the queue.
        let monitor = ConnectivityMonitor::new(true, events.clone());

        let descargas = Arc::new(DownloadService::new(
            Arc::clone(&api),
            Arc::clone(&store) as Arc<dyn ObraRepository>,
            Arc::clone(&store) as Arc<dyn TareaRepository>,
            Arc::clone(&store) as Arc<dyn InventarioRepository>,
            Arc::clone(&store) as Arc<dyn ConfigRepository>,
            config.api.inventario_limit,
        ));
        let sync = Arc::new(SyncService::new(
            Arc::clone(&api),
            Arc::clone(&store) as Arc<dyn SyncQueueRepository>,
            Arc::clone(&store) as Arc<dyn AvanceRepository>,
            Arc::clone(&store) as Arc<dyn FotoRepository>,
            Arc::clone(&descargas),
            monitor.clone(),
            events.clone(),
            config.sync.clone(),
        ));
        let avances = Arc::new(AvanceService::new(
            Arc::clone(&api),
            Arc::clone(&store) as Arc<dyn AvanceRepository>,
            Arc::clone(&store) as Arc<dyn FotoRepository>,
            Arc::clone(&store) as Arc<dyn SyncQueueRepository>,
            monitor.clone(),
            events.clone(),
        ));
        let tareas = Arc::new(TareaService::new(
            Arc::clone(&api),
            Arc::clone(&store) as Arc<dyn TareaRepository>,
            Arc::clone(&store) as Arc<dyn SyncQueueRepository>,
            monitor.clone(),
            events.clone(),
        ));
        let bridge = Arc::new(SyncWorkerBridge::new(
            Arc::clone(&api),
            Arc::clone(&store) as Arc<dyn SyncQueueRepository>,
            Arc::clone(&store) as Arc<dyn ResponseCacheRepository>,
            Arc::clone(&sync),
            monitor.clone(),
            events.clone(),
        ));

        Ok(Self {
            config,
            pool,
            store,
            api,
            monitor,
            events,
            avances,
            tareas,
            descargas,
            sync,
            bridge,
        })
    }

    /// Registers the reconnect listener and, when enabled, the periodic
    /// background pass.
    pub async fn start_background_sync(&self) {
        self.bridge.register();
        if self.config.sync.auto_sync {
            self.sync.schedule_sync(self.config.sync.sync_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Avance, FotoPendiente, InventarioItem, Obra, Tarea};
    use crate::domain::value_objects::{NuevoAvance, TareaUpdate};
    use crate::shared::config::DatabaseConfig;
    use async_trait::async_trait;
    use mockall::mock;

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

    fn memory_config() -> AppConfig {
        AppConfig {
            database: DatabaseConfig {
                url: ":memory:".to_string(),
                max_connections: 1,
                connection_timeout: 30,
            },
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn services_share_one_store() {
        let context = AppContext::init_with_api(memory_config(), Arc::new(MockApi::new()))
            .await
            .expect("init");
        context.monitor.report_offline();

        context
            .avances
            .crear_avance(NuevoAvance {
                tarea_id: 3,
                descripcion: "Encofrado de columnas".to_string(),
                porcentaje: None,
            })
            .await
            .expect("create offline");

        let status_count = context.store.count_pending().await.expect("count");
        assert_eq!(status_count, 1);
        let avances = context.store.get_unsynced_avances().await.expect("unsynced");
        assert_eq!(avances.len(), 1);
    }

    #[tokio::test]
    async fn init_rejects_invalid_config() {
        let mut config = memory_config();
        config.api.base_url.clear();

        let err = AppContext::init(config).await.expect_err("must fail");
        assert!(matches!(err, AppError::Config(_)));
    }
}
