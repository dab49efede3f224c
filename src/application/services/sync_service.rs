use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::download_service::{DownloadService, DownloadSummary};
use crate::application::ports::{AvanceRepository, FotoRepository, RemoteApi, SyncQueueRepository};
use crate::domain::entities::{Avance, DeadLetter, SyncQueueEntry};
use crate::domain::value_objects::SyncOperation;
use crate::infrastructure::connectivity::ConnectivityMonitor;
use crate::presentation::{EventBus, UiEvent};
use crate::shared::config::SyncConfig;
use crate::shared::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncStatus {
    pub is_syncing: bool,
    pub pending_entries: u64,
    pub last_sync: Option<i64>,
    pub sync_errors: u32,
}

/// Result of one sync pass. `skipped` counts entries whose backoff window
/// has not elapsed yet; they stay queued in their original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    pub attempted: u64,
    pub synced: u64,
    pub failed: u64,
    pub dead_lettered: u64,
    pub skipped: u64,
    pub pending_after: u64,
    pub download: DownloadSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    AlreadyRunning,
    Completed(SyncReport),
}

/// Drains the offline queue against the server and refreshes the read-only
/// collections afterwards. At most one pass runs at a time; overlapping
/// triggers collapse into the pass already in flight.
#[derive(Clone)]
pub struct SyncService {
    api: Arc<dyn RemoteApi>,
    queue: Arc<dyn SyncQueueRepository>,
    avances: Arc<dyn AvanceRepository>,
    fotos: Arc<dyn FotoRepository>,
    descargas: Arc<DownloadService>,
    monitor: ConnectivityMonitor,
    events: EventBus,
    config: SyncConfig,
    status: Arc<RwLock<SyncStatus>>,
    in_flight: Arc<AtomicBool>,
}

struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl SyncService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        api: Arc<dyn RemoteApi>,
        queue: Arc<dyn SyncQueueRepository>,
        avances: Arc<dyn AvanceRepository>,
        fotos: Arc<dyn FotoRepository>,
        descargas: Arc<DownloadService>,
        monitor: ConnectivityMonitor,
        events: EventBus,
        config: SyncConfig,
    ) -> Self {
        Self {
            api,
            queue,
            avances,
            fotos,
            descargas,
            monitor,
            events,
            config,
            status: Arc::new(RwLock::new(SyncStatus::default())),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn status(&self) -> SyncStatus {
        self.status.read().await.clone()
    }

    pub async fn dead_letters(&self) -> Result<Vec<DeadLetter>, AppError> {
        self.queue.list_dead_letters().await
    }

    /// Runs one sync pass unless another is already in flight.
    pub async fn start_sync(&self) -> Result<SyncOutcome, AppError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            info!("Sync already running, skipping");
            return Ok(SyncOutcome::AlreadyRunning);
        }
        let _guard = InFlightGuard {
            flag: Arc::clone(&self.in_flight),
        };

        {
            let mut status = self.status.write().await;
            status.is_syncing = true;
        }

        let result = self.run_pass().await;

        let mut status = self.status.write().await;
        status.is_syncing = false;
        match &result {
            Ok(report) => {
                status.last_sync = Some(Utc::now().timestamp());
                status.pending_entries = report.pending_after;
            }
            Err(_) => status.sync_errors += 1,
        }
        drop(status);

        result.map(SyncOutcome::Completed)
    }

    /// Spawns the periodic background pass. Ticks while offline are
    /// skipped; the edge-triggered sync on reconnect covers catching up.
    pub async fn schedule_sync(&self, interval_secs: u64) {
        let service = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
            loop {
                ticker.tick().await;
                if !service.monitor.is_online() {
                    continue;
                }
                if let Err(e) = service.start_sync().await {
                    error!("Sync error: {}", e);
                }
            }
        });
    }

    async fn run_pass(&self) -> Result<SyncReport, AppError> {
        if !self.monitor.is_online() {
            info!("Offline, skipping sync pass");
            return Ok(SyncReport {
                pending_after: self.queue.count_pending().await?,
                ..SyncReport::default()
            });
        }

        let now = Utc::now();
        let entries = self.queue.pending_entries().await?;
        let mut report = SyncReport::default();

        for entry in entries {
            if !entry.is_due(now) {
                report.skipped += 1;
                continue;
            }
            report.attempted += 1;

            match self.dispatch(&entry).await {
                Ok(url) => {
                    self.queue.acknowledge(entry.id).await?;
                    report.synced += 1;
                    self.events.emit(UiEvent::SyncSuccess { url });
                }
                Err(e) if matches!(e, AppError::QueueEntry(_) | AppError::Serialization(_)) => {
                    warn!("Entry {} cannot be replayed, dead-lettering: {}", entry.id, e);
                    self.queue.dead_letter(&entry, &e.to_string()).await?;
                    report.dead_lettered += 1;
                }
                Err(e) => {
                    if self.record_retry(&entry, &e).await? {
                        report.dead_lettered += 1;
                    } else {
                        report.failed += 1;
                    }
                }
            }
        }

        report.download = self.descargas.refresh_all().await;
        report.pending_after = self.queue.count_pending().await?;
        self.events.emit(UiEvent::PendingCountChanged {
            count: report.pending_after,
        });

        info!(
            "Sync pass finished: synced={} failed={} dead_lettered={} skipped={} pending={}",
            report.synced, report.failed, report.dead_lettered, report.skipped, report.pending_after
        );
        Ok(report)
    }

    /// Replays one entry against the server. Returns the endpoint path
    /// for the success notification.
    async fn dispatch(&self, entry: &SyncQueueEntry) -> Result<String, AppError> {
        let operation = entry
            .operation()
            .map_err(|e| AppError::QueueEntry(format!("entry {}: {}", entry.id, e)))?;
        self.execute(operation, entry.created_at).await
    }

    /// Performs one operation against the server and applies the local
    /// bookkeeping. Also the direct path for submissions made while online.
    pub(crate) async fn execute(
        &self,
        operation: SyncOperation,
        created_at: chrono::DateTime<Utc>,
    ) -> Result<String, AppError> {
        match operation {
            SyncOperation::CrearAvance {
                offline_id,
                tarea_id,
                descripcion,
                porcentaje,
            } => {
                // A crash between the server accepting the create and the
                // acknowledge leaves a synced row with a live entry. Do not
                // create the avance twice.
                if let Some(existing) = self.avances.get_avance_by_offline_id(&offline_id).await? {
                    if existing.synced {
                        return Ok("/api/offline/crear-avance".to_string());
                    }
                }

                let avance = Avance {
                    local_id: None,
                    offline_id: offline_id.clone(),
                    server_id: None,
                    tarea_id,
                    descripcion,
                    porcentaje,
                    synced: false,
                    created_at,
                };
                let server_id = self.api.crear_avance(&avance).await?;
                self.avances
                    .mark_avance_synced(&offline_id, server_id)
                    .await?;
                Ok("/api/offline/crear-avance".to_string())
            }
            SyncOperation::ActualizarTarea { tarea_id, cambios } => {
                self.api.actualizar_tarea(tarea_id, &cambios).await?;
                Ok(format!("/api/offline/actualizar-tarea/{tarea_id}"))
            }
            SyncOperation::SubirFoto { foto_id } => {
                let foto = self
                    .fotos
                    .get_foto(foto_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::QueueEntry(format!("foto {foto_id} no longer exists"))
                    })?;
                if foto.synced {
                    return Ok("/api/avances/upload-foto".to_string());
                }
                let avance = self
                    .avances
                    .get_avance(foto.avance_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::QueueEntry(format!(
                            "avance {} for foto {foto_id} no longer exists",
                            foto.avance_id
                        ))
                    })?;
                // Queue order guarantees the create entry ran first, but
                // its confirmation may still be waiting on a retry.
                let server_id = avance.server_id.ok_or_else(|| {
                    AppError::Internal(format!("avance {} not confirmed yet", foto.avance_id))
                })?;
                self.api.subir_foto(server_id, &foto).await?;
                self.fotos.mark_foto_synced(foto_id).await?;
                Ok("/api/avances/upload-foto".to_string())
            }
        }
    }

    /// Reschedules a failed entry with exponential backoff, or dead-letters
    /// it once the retry budget is spent. Returns true when dead-lettered.
    async fn record_retry(
        &self,
        entry: &SyncQueueEntry,
        error: &AppError,
    ) -> Result<bool, AppError> {
        let failures = entry.retry_count + 1;
        if failures >= self.config.max_retries {
            warn!(
                "Entry {} failed {} times, dead-lettering: {}",
                entry.id, failures, error
            );
            self.queue.dead_letter(entry, &error.to_string()).await?;
            return Ok(true);
        }

        let backoff = self
            .config
            .backoff_base
            .saturating_mul(2u64.saturating_pow(failures.saturating_sub(1)));
        let next_attempt_at = Utc::now() + chrono::Duration::seconds(backoff as i64);
        warn!(
            "Entry {} failed (attempt {}), retrying in {}s: {}",
            entry.id, failures, backoff, error
        );
        self.queue
            .record_failure(entry.id, &error.to_string(), next_attempt_at)
            .await?;
        Ok(false)
    }
}
