pub mod bridge;

pub use bridge::{SubmitOutcome, SyncWorkerBridge};
