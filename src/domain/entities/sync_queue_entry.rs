use crate::domain::value_objects::SyncOperation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One not-yet-acknowledged mutating operation. The autoincrement id
/// preserves insertion order and defines replay order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncQueueEntry {
    pub id: i64,
    pub tipo: String,
    pub payload: String,
    pub retry_count: u32,
    pub next_attempt_at: DateTime<Utc>,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SyncQueueEntry {
    /// Decodes the stored payload into its typed operation.
    pub fn operation(&self) -> Result<SyncOperation, serde_json::Error> {
        serde_json::from_str(&self.payload)
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_attempt_at <= now
    }
}

/// Queue entry parked after exhausting its retry budget, kept for
/// inspection instead of being dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeadLetter {
    pub id: Option<i64>,
    pub queue_id: i64,
    pub tipo: String,
    pub payload: String,
    pub retry_count: u32,
    pub last_error: String,
    pub created_at: DateTime<Utc>,
    pub dead_at: DateTime<Utc>,
}

impl DeadLetter {
    pub fn from_entry(entry: &SyncQueueEntry, last_error: String, dead_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            queue_id: entry.id,
            tipo: entry.tipo.clone(),
            payload: entry.payload.clone(),
            retry_count: entry.retry_count,
            last_error,
            created_at: entry.created_at,
            dead_at,
        }
    }
}
