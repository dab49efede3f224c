use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Crew member roster entry, seeded by the host shell at login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Usuario {
    pub id: i64,
    pub nombre: String,
    pub email: Option<String>,
    pub rol: Option<String>,
    pub updated_at: DateTime<Utc>,
}
