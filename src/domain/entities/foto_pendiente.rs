use crate::domain::value_objects::NuevaFoto;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Photo captured while offline, held as a raw blob until its avance has a
/// server id and the upload succeeds. `avance_id` references the avance's
/// local id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FotoPendiente {
    pub id: Option<i64>,
    pub avance_id: i64,
    pub filename: String,
    pub mime_type: String,
    pub datos: Vec<u8>,
    pub synced: bool,
    pub created_at: DateTime<Utc>,
}

impl FotoPendiente {
    pub fn new(avance_id: i64, foto: NuevaFoto) -> Self {
        Self {
            id: None,
            avance_id,
            filename: foto.filename,
            mime_type: foto.mime_type,
            datos: foto.datos,
            synced: false,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn mark_synced(&mut self) {
        self.synced = true;
    }
}
