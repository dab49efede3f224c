use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Construction project. Bulk-downloaded only, never mutated offline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Obra {
    pub id: i64,
    pub nombre: String,
    pub estado: String,
    pub updated_at: DateTime<Utc>,
}
