use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tracing::{error, info, warn};

use crate::application::ports::{RemoteApi, ResponseCacheRepository, SyncQueueRepository};
use crate::application::services::SyncService;
use crate::domain::value_objects::SyncOperation;
use crate::infrastructure::connectivity::ConnectivityMonitor;
use crate::presentation::{EventBus, UiEvent};
use crate::shared::error::AppError;

/// How a submitted operation was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The server accepted the operation on the spot.
    Accepted { url: String },
    /// The operation was queued for the next sync pass.
    Queued { queue_id: i64 },
}

/// Long-lived seam between the host shell and the sync engine. Owns the
/// connectivity listener that starts a sync pass on each offline-to-online
/// edge, serves cached reads while disconnected, and turns mutations that
/// cannot reach the server into queue entries instead of errors.
pub struct SyncWorkerBridge {
    api: Arc<dyn RemoteApi>,
    queue: Arc<dyn SyncQueueRepository>,
    cache: Arc<dyn ResponseCacheRepository>,
    sync: Arc<SyncService>,
    monitor: ConnectivityMonitor,
    events: EventBus,
    registered: AtomicBool,
}

impl SyncWorkerBridge {
    pub fn new(
        api: Arc<dyn RemoteApi>,
        queue: Arc<dyn SyncQueueRepository>,
        cache: Arc<dyn ResponseCacheRepository>,
        sync: Arc<SyncService>,
        monitor: ConnectivityMonitor,
        events: EventBus,
    ) -> Self {
        Self {
            api,
            queue,
            cache,
            sync,
            monitor,
            events,
            registered: AtomicBool::new(false),
        }
    }

    /// Spawns the connectivity listener. Returns false when the bridge was
    /// already registered; the extra call changes nothing.
    pub fn register(&self) -> bool {
        if self
            .registered
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            info!("Worker bridge already registered");
            return false;
        }

        let sync = Arc::clone(&self.sync);
        let mut connectivity = self.monitor.subscribe();
        tokio::spawn(async move {
            // The monitor only notifies on real state flips, so every wake
            // here is an edge.
            while connectivity.changed().await.is_ok() {
                let online = *connectivity.borrow_and_update();
                if !online {
                    continue;
                }
                info!("Connectivity restored, starting sync");
                if let Err(e) = sync.start_sync().await {
                    error!("Sync after reconnect failed: {}", e);
                }
            }
        });

        info!("Worker bridge registered");
        true
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }

    /// Read path: network first while online, refreshing the cached copy
    /// on success; the cache answers when the network cannot.
    pub async fn fetch_json(&self, path: &str) -> Result<String, AppError> {
        if self.monitor.is_online() {
            match self.api.get_json(path).await {
                Ok(body) => {
                    if let Err(e) = self.cache.put_cached(path, &body).await {
                        warn!("Failed to cache response for {}: {}", path, e);
                    }
                    return Ok(body);
                }
                Err(e) => warn!("Fetch of {} failed, trying cache: {}", path, e),
            }
        }

        match self.cache.get_cached(path).await? {
            Some(cached) => Ok(cached.body),
            None => Err(AppError::Network(format!(
                "offline and no cached copy of {path}"
            ))),
        }
    }

    /// Write path: performed directly while online, queued otherwise. A
    /// submission never fails just because the server is unreachable.
    pub async fn submit(&self, operation: SyncOperation) -> Result<SubmitOutcome, AppError> {
        if self.monitor.is_online() {
            match self.sync.execute(operation.clone(), Utc::now()).await {
                Ok(url) => return Ok(SubmitOutcome::Accepted { url }),
                Err(e) => warn!("Direct submit failed, queueing: {}", e),
            }
        }

        let entry = self.queue.enqueue(&operation).await?;
        let kind = operation.kind();
        self.events.emit(UiEvent::QueuedForSync {
            tipo: kind.as_str().to_string(),
            method: kind.http_method().to_string(),
        });
        match self.queue.count_pending().await {
            Ok(count) => self.events.emit(UiEvent::PendingCountChanged { count }),
            Err(e) => warn!("Failed to count pending entries: {}", e),
        }
        Ok(SubmitOutcome::Queued { queue_id: entry.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        AvanceRepository, ConfigRepository, FotoRepository, InventarioRepository, ObraRepository,
        Store, TareaRepository,
    };
    use crate::application::services::DownloadService;
    use crate::domain::entities::{Avance, FotoPendiente, InventarioItem, Obra, Tarea};
    use crate::domain::value_objects::TareaUpdate;
    use crate::infrastructure::database::{ConnectionPool, SqliteStore};
    use crate::shared::config::SyncConfig;
    use async_trait::async_trait;
    use mockall::mock;
    use std::time::Duration;

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

    fn bridge_with(
        api: MockApi,
        store: &Arc<SqliteStore>,
        online: bool,
    ) -> (SyncWorkerBridge, ConnectivityMonitor, EventBus) {
        let api: Arc<dyn RemoteApi> = Arc::new(api);
        let events = EventBus::new();
        let monitor = ConnectivityMonitor::new(online, events.clone());
        let descargas = Arc::new(DownloadService::new(
            Arc::clone(&api),
            Arc::clone(store) as Arc<dyn ObraRepository>,
            Arc::clone(store) as Arc<dyn TareaRepository>,
            Arc::clone(store) as Arc<dyn InventarioRepository>,
            Arc::clone(store) as Arc<dyn ConfigRepository>,
            1000,
        ));
        let sync = Arc::new(SyncService::new(
            Arc::clone(&api),
            Arc::clone(store) as Arc<dyn SyncQueueRepository>,
            Arc::clone(store) as Arc<dyn AvanceRepository>,
            Arc::clone(store) as Arc<dyn FotoRepository>,
            descargas,
            monitor.clone(),
            events.clone(),
            SyncConfig {
                auto_sync: true,
                sync_interval: 300,
                max_retries: 3,
                backoff_base: 30,
            },
        ));
        let bridge = SyncWorkerBridge::new(
            api,
            Arc::clone(store) as Arc<dyn SyncQueueRepository>,
            Arc::clone(store) as Arc<dyn ResponseCacheRepository>,
            sync,
            monitor.clone(),
            events.clone(),
        );
        (bridge, monitor, events)
    }

    fn empty_downloads(api: &mut MockApi) {
        api.expect_descargar_obras().returning(|| Ok(vec![]));
        api.expect_descargar_tareas().returning(|| Ok(vec![]));
        api.expect_descargar_inventario().returning(|_| Ok(vec![]));
    }

    fn estado_update(estado: &str) -> TareaUpdate {
        TareaUpdate {
            estado: Some(estado.to_string()),
            ..TareaUpdate::default()
        }
    }

    #[tokio::test]
    async fn register_is_idempotent() {
        let store = setup_store().await;
        let (bridge, _monitor, _events) = bridge_with(MockApi::new(), &store, false);

        assert!(bridge.register());
        assert!(!bridge.register());
        assert!(bridge.is_registered());
    }

    #[tokio::test]
    async fn reconnect_edge_drains_queue() {
        let store = setup_store().await;
        store
            .enqueue(&SyncOperation::ActualizarTarea {
                tarea_id: 1,
                cambios: estado_update("en_progreso"),
            })
            .await
            .expect("enqueue first");
        store
            .enqueue(&SyncOperation::ActualizarTarea {
                tarea_id: 2,
                cambios: estado_update("completada"),
            })
            .await
            .expect("enqueue second");

        let mut api = MockApi::new();
        empty_downloads(&mut api);
        api.expect_actualizar_tarea().times(2).returning(|_, _| Ok(()));

        let (bridge, monitor, events) = bridge_with(api, &store, false);
        let mut rx = events.subscribe();
        bridge.register();

        monitor.report_online();

        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let event = rx.recv().await.expect("event stream stays open");
                if event == (UiEvent::PendingCountChanged { count: 0 }) {
                    break;
                }
            }
        })
        .await
        .expect("queue drains after the reconnect edge");

        assert_eq!(store.count_pending().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn fetch_json_refreshes_cache_while_online() {
        let store = setup_store().await;
        let mut api = MockApi::new();
        api.expect_get_json()
            .times(1)
            .returning(|_| Ok(r#"{"obras":[]}"#.to_string()));
        let (bridge, _monitor, _events) = bridge_with(api, &store, true);

        let body = bridge
            .fetch_json("/api/offline/mis-obras")
            .await
            .expect("fetch");

        assert_eq!(body, r#"{"obras":[]}"#);
        let cached = store
            .get_cached("/api/offline/mis-obras")
            .await
            .expect("cache lookup")
            .expect("cached copy");
        assert_eq!(cached.body, body);
    }

    #[tokio::test]
    async fn fetch_json_serves_cache_while_offline() {
        let store = setup_store().await;
        store
            .put_cached("/api/offline/mis-tareas", r#"{"tareas":[]}"#)
            .await
            .expect("seed cache");
        let (bridge, _monitor, _events) = bridge_with(MockApi::new(), &store, false);

        let body = bridge
            .fetch_json("/api/offline/mis-tareas")
            .await
            .expect("fetch from cache");
        assert_eq!(body, r#"{"tareas":[]}"#);

        let err = bridge
            .fetch_json("/api/offline/inventario-basico")
            .await
            .expect_err("nothing cached for this path");
        assert!(matches!(err, AppError::Network(_)));
    }

    #[tokio::test]
    async fn offline_submit_queues_instead_of_failing() {
        let store = setup_store().await;
        let (bridge, _monitor, events) = bridge_with(MockApi::new(), &store, false);
        let mut rx = events.subscribe();

        let outcome = bridge
            .submit(SyncOperation::ActualizarTarea {
                tarea_id: 9,
                cambios: estado_update("pausada"),
            })
            .await
            .expect("submit");

        assert!(matches!(outcome, SubmitOutcome::Queued { .. }));
        assert_eq!(store.count_pending().await.expect("count"), 1);
        assert_eq!(
            rx.recv().await.expect("queued event"),
            UiEvent::QueuedForSync {
                tipo: "actualizar_tarea".to_string(),
                method: "PUT".to_string(),
            }
        );
        assert_eq!(
            rx.recv().await.expect("count event"),
            UiEvent::PendingCountChanged { count: 1 }
        );
    }

    #[tokio::test]
    async fn online_submit_reaches_the_server_directly() {
        let store = setup_store().await;
        let mut api = MockApi::new();
        api.expect_actualizar_tarea()
            .times(1)
            .returning(|_, _| Ok(()));
        let (bridge, _monitor, _events) = bridge_with(api, &store, true);

        let outcome = bridge
            .submit(SyncOperation::ActualizarTarea {
                tarea_id: 9,
                cambios: estado_update("pausada"),
            })
            .await
            .expect("submit");

        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                url: "/api/offline/actualizar-tarea/9".to_string(),
            }
        );
        assert_eq!(store.count_pending().await.expect("count"), 0);
    }
}
