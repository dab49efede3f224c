use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task belonging to an obra. Offline edits are queued, never applied to
/// this record until the server confirms them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tarea {
    pub id: i64,
    pub obra_id: i64,
    pub nombre: String,
    pub estado: String,
    pub asignado_a: Option<String>,
    pub updated_at: DateTime<Utc>,
}
