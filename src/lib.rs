pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod shared;
pub mod state;

pub use application::ports;
pub use application::services::{
    AvanceService, DownloadService, DownloadSummary, FotoAdjuntada, SyncOutcome, SyncReport,
    SyncService, SyncStatus, TareaActualizada, TareaService,
};
pub use infrastructure::api::RestClient;
pub use infrastructure::connectivity::ConnectivityMonitor;
pub use infrastructure::database::{ConnectionPool, SqliteStore};
pub use infrastructure::worker::{SubmitOutcome, SyncWorkerBridge};
pub use presentation::{EventBus, UiEvent};
pub use shared::config::AppConfig;
pub use shared::error::{AppError, Result};
pub use state::AppContext;

pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "obyra_sync=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
