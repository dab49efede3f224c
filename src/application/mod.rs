pub mod ports;
pub mod services;

pub use services::{AvanceService, DownloadService, SyncService, TareaService};
