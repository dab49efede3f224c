use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ports::{RemoteApi, SyncQueueRepository, TareaRepository};
use crate::domain::entities::Tarea;
use crate::domain::value_objects::{SyncOperation, SyncOperationKind, TareaUpdate};
use crate::infrastructure::connectivity::ConnectivityMonitor;
use crate::presentation::{EventBus, UiEvent};
use crate::shared::error::AppError;

/// Outcome of a task update: applied by the server on the spot, or queued.
/// Queued edits are never applied to the local tarea row; the next bulk
/// download brings back whatever the server accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum TareaActualizada {
    Confirmada,
    EnCola { queue_id: i64 },
}

pub struct TareaService {
    api: Arc<dyn RemoteApi>,
    tareas: Arc<dyn TareaRepository>,
    queue: Arc<dyn SyncQueueRepository>,
    monitor: ConnectivityMonitor,
    events: EventBus,
}

impl TareaService {
    pub fn new(
        api: Arc<dyn RemoteApi>,
        tareas: Arc<dyn TareaRepository>,
        queue: Arc<dyn SyncQueueRepository>,
        monitor: ConnectivityMonitor,
        events: EventBus,
    ) -> Self {
        Self {
            api,
            tareas,
            queue,
            monitor,
            events,
        }
    }

    pub async fn actualizar_tarea(
        &self,
        tarea_id: i64,
        cambios: TareaUpdate,
    ) -> Result<TareaActualizada, AppError> {
        if tarea_id <= 0 {
            return Err(AppError::InvalidInput(
                "tarea_id must be positive".to_string(),
            ));
        }
        cambios.validate().map_err(AppError::InvalidInput)?;

        if self.monitor.is_online() {
            match self.api.actualizar_tarea(tarea_id, &cambios).await {
                Ok(()) => {
                    info!("Tarea {} updated directly", tarea_id);
                    return Ok(TareaActualizada::Confirmada);
                }
                Err(e) => {
                    warn!("Direct tarea update failed, falling back to queue: {}", e);
                }
            }
        }

        let entry = self
            .queue
            .enqueue(&SyncOperation::ActualizarTarea { tarea_id, cambios })
            .await?;
        self.notify_queued(SyncOperationKind::ActualizarTarea).await;
        Ok(TareaActualizada::EnCola { queue_id: entry.id })
    }

    pub async fn tareas_por_obra(&self, obra_id: i64) -> Result<Vec<Tarea>, AppError> {
        self.tareas.get_tareas_by_obra(obra_id).await
    }

    pub async fn tareas_asignadas(&self, asignado_a: &str) -> Result<Vec<Tarea>, AppError> {
        self.tareas.get_tareas_by_asignado(asignado_a).await
    }

    async fn notify_queued(&self, kind: SyncOperationKind) {
        self.events.emit(UiEvent::QueuedForSync {
            tipo: kind.as_str().to_string(),
            method: kind.http_method().to_string(),
        });
        match self.queue.count_pending().await {
            Ok(count) => self.events.emit(UiEvent::PendingCountChanged { count }),
            Err(e) => warn!("Failed to count pending entries: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::Store;
    use crate::domain::entities::{Avance, FotoPendiente, InventarioItem, Obra};
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

    fn service_with(api: MockApi, store: &Arc<SqliteStore>, online: bool) -> TareaService {
        TareaService::new(
            Arc::new(api),
            Arc::clone(store) as Arc<dyn TareaRepository>,
            Arc::clone(store) as Arc<dyn SyncQueueRepository>,
            ConnectivityMonitor::new(online, EventBus::new()),
            EventBus::new(),
        )
    }

    fn cambios() -> TareaUpdate {
        TareaUpdate {
            estado: Some("completada".to_string()),
            ..TareaUpdate::default()
        }
    }

    #[tokio::test]
    async fn update_is_confirmed_directly_when_online() {
        let store = setup_store().await;
        let mut api = MockApi::new();
        api.expect_actualizar_tarea()
            .withf(|tarea_id, cambios| *tarea_id == 12 && cambios.estado.is_some())
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service_with(api, &store, true);
        let resultado = service
            .actualizar_tarea(12, cambios())
            .await
            .expect("update");

        assert_eq!(resultado, TareaActualizada::Confirmada);
        assert_eq!(store.count_pending().await.expect("queue count"), 0);
    }

    #[tokio::test]
    async fn update_is_queued_when_offline() {
        let store = setup_store().await;
        let service = service_with(MockApi::new(), &store, false);

        let resultado = service
            .actualizar_tarea(12, cambios())
            .await
            .expect("update");

        assert!(matches!(resultado, TareaActualizada::EnCola { .. }));
        let entries = store.pending_entries().await.expect("pending entries");
        assert_eq!(entries.len(), 1);
        let operation = entries[0].operation().expect("decode payload");
        assert_eq!(
            operation,
            SyncOperation::ActualizarTarea {
                tarea_id: 12,
                cambios: cambios(),
            }
        );
    }

    #[tokio::test]
    async fn update_falls_back_to_queue_on_network_error() {
        let store = setup_store().await;
        let mut api = MockApi::new();
        api.expect_actualizar_tarea()
            .times(1)
            .returning(|_, _| Err(AppError::Network("timed out".to_string())));

        let service = service_with(api, &store, true);
        let resultado = service
            .actualizar_tarea(12, cambios())
            .await
            .expect("update");

        assert!(matches!(resultado, TareaActualizada::EnCola { .. }));
        assert_eq!(store.count_pending().await.expect("queue count"), 1);
    }

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let store = setup_store().await;
        let service = service_with(MockApi::new(), &store, true);

        let err = service
            .actualizar_tarea(12, TareaUpdate::default())
            .await
            .expect_err("must fail");

        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(store.count_pending().await.expect("queue count"), 0);
    }

    #[tokio::test]
    async fn queued_update_publishes_events() {
        let store = setup_store().await;
        let events = EventBus::new();
        let mut rx = events.subscribe();
        let service = TareaService::new(
            Arc::new(MockApi::new()),
            Arc::clone(&store) as Arc<dyn TareaRepository>,
            Arc::clone(&store) as Arc<dyn SyncQueueRepository>,
            ConnectivityMonitor::new(false, EventBus::new()),
            events,
        );

        service
            .actualizar_tarea(12, cambios())
            .await
            .expect("update");

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
}
