use anyhow::Result;
use obyra_sync::ports::{ObraRepository, SyncQueueRepository, TareaRepository};
use obyra_sync::{AppConfig, AppContext, SyncOutcome, init_logging};
use tracing::{info, warn};

/// Connects to the configured server, reports local store counts, runs one
/// sync pass and prints what happened. Configuration comes from OBYRA_*
/// environment variables.
#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = AppConfig::from_env();
    info!("Remote API: {}", config.api.base_url);
    let context = AppContext::init(config).await?;

    let obras = context.store.count_obras().await?;
    let tareas = context.store.count_tareas().await?;
    let pendientes = context.store.count_pending().await?;
    info!(
        "Local store: {} obras, {} tareas, {} queued operations",
        obras, tareas, pendientes
    );

    match context.sync.start_sync().await? {
        SyncOutcome::Completed(report) => {
            info!(
                "Pass finished: {} synced, {} failed, {} dead-lettered, {} still pending",
                report.synced, report.failed, report.dead_lettered, report.pending_after
            );
            for error in &report.download.errors {
                warn!("Download incomplete: {}", error);
            }
        }
        SyncOutcome::AlreadyRunning => info!("Another sync pass was already running"),
    }

    let muertas = context.sync.dead_letters().await?;
    if !muertas.is_empty() {
        warn!(
            "{} operations are parked in the dead-letter collection",
            muertas.len()
        );
    }

    Ok(())
}
