use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ports::{AvanceRepository, FotoRepository, RemoteApi, SyncQueueRepository};
use crate::domain::entities::{Avance, FotoPendiente};
use crate::domain::value_objects::{AvanceCreado, NuevaFoto, NuevoAvance, SyncOperationKind};
use crate::infrastructure::connectivity::ConnectivityMonitor;
use crate::presentation::{EventBus, UiEvent};
use crate::shared::error::AppError;

/// Outcome of attaching a photo: uploaded straight to the server (no local
/// row remains) or parked locally with an upload-photo queue entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FotoAdjuntada {
    Subida { foto: FotoPendiente },
    EnCola { foto: FotoPendiente },
}

impl FotoAdjuntada {
    pub fn is_queued(&self) -> bool {
        matches!(self, FotoAdjuntada::EnCola { .. })
    }
}

/// Field-side writes for avances and their photos. Every write follows the
/// same dual path: try the server directly while online, otherwise (or on
/// any failure) persist locally and queue for the next sync pass.
pub struct AvanceService {
    api: Arc<dyn RemoteApi>,
    avances: Arc<dyn AvanceRepository>,
    fotos: Arc<dyn FotoRepository>,
    queue: Arc<dyn SyncQueueRepository>,
    monitor: ConnectivityMonitor,
    events: EventBus,
}

impl AvanceService {
    pub fn new(
        api: Arc<dyn RemoteApi>,
        avances: Arc<dyn AvanceRepository>,
        fotos: Arc<dyn FotoRepository>,
        queue: Arc<dyn SyncQueueRepository>,
        monitor: ConnectivityMonitor,
        events: EventBus,
    ) -> Self {
        Self {
            api,
            avances,
            fotos,
            queue,
            monitor,
            events,
        }
    }

    /// Creates an avance. The returned [`AvanceCreado`] tells the caller
    /// whether the server confirmed it on the spot or it is waiting in the
    /// queue; local-store failures propagate since there is no further
    /// fallback.
    pub async fn crear_avance(&self, datos: NuevoAvance) -> Result<AvanceCreado, AppError> {
        datos.validate().map_err(AppError::InvalidInput)?;

        let mut avance = Avance::new_offline(datos);

        if self.monitor.is_online() {
            match self.api.crear_avance(&avance).await {
                Ok(server_id) => {
                    avance.mark_synced(server_id);
                    let stored = self.avances.put_avance(&avance).await?;
                    info!(
                        "Avance {} confirmed directly with server id {}",
                        stored.offline_id, server_id
                    );
                    return Ok(AvanceCreado::Confirmado { avance: stored });
                }
                Err(e) => {
                    warn!("Direct avance creation failed, falling back to queue: {}", e);
                }
            }
        }

        let (stored, _entry) = self.avances.crear_avance_offline(&avance).await?;
        self.notify_queued(SyncOperationKind::CrearAvance).await;
        Ok(AvanceCreado::Offline { avance: stored })
    }

    /// Attaches a photo to an existing avance. Direct upload is only
    /// possible once the avance has a server id; otherwise the photo waits
    /// in the queue behind the avance's own creation.
    pub async fn adjuntar_foto(
        &self,
        avance_local_id: i64,
        foto: NuevaFoto,
    ) -> Result<FotoAdjuntada, AppError> {
        foto.validate().map_err(AppError::InvalidInput)?;

        let avance = self
            .avances
            .get_avance(avance_local_id)
            .await?
            .ok_or_else(|| {
                AppError::InvalidInput(format!("Avance {avance_local_id} does not exist"))
            })?;

        let mut pendiente = FotoPendiente::new(avance_local_id, foto);

        if self.monitor.is_online() {
            if let Some(server_id) = avance.server_id {
                match self.api.subir_foto(server_id, &pendiente).await {
                    Ok(()) => {
                        pendiente.mark_synced();
                        info!("Foto for avance {} uploaded directly", avance_local_id);
                        return Ok(FotoAdjuntada::Subida { foto: pendiente });
                    }
                    Err(e) => {
                        warn!("Direct foto upload failed, falling back to queue: {}", e);
                    }
                }
            }
        }

        let (stored, _entry) = self.fotos.guardar_foto_offline(&pendiente).await?;
        self.notify_queued(SyncOperationKind::SubirFoto).await;
        Ok(FotoAdjuntada::EnCola { foto: stored })
    }

    pub async fn avances_por_tarea(&self, tarea_id: i64) -> Result<Vec<Avance>, AppError> {
        self.avances.get_avances_by_tarea(tarea_id).await
    }

    pub async fn avances_pendientes(&self) -> Result<Vec<Avance>, AppError> {
        self.avances.get_unsynced_avances().await
    }

    pub async fn fotos_pendientes(&self) -> Result<Vec<FotoPendiente>, AppError> {
        self.fotos.get_fotos_pendientes().await
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
