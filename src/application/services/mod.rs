pub mod avance_service;
pub mod download_service;
pub mod sync_service;
pub mod tarea_service;

pub use avance_service::{AvanceService, FotoAdjuntada};
pub use download_service::{DownloadService, DownloadSummary};
pub use sync_service::{SyncOutcome, SyncReport, SyncService, SyncStatus};
pub use tarea_service::{TareaActualizada, TareaService};
