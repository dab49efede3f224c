use crate::domain::value_objects::NuevoAvance;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress record logged against a tarea, the primary offline-created
/// entity. `offline_id` correlates the local row with its queue entry and
/// with the server response; `server_id` is assigned after a successful
/// round-trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Avance {
    pub local_id: Option<i64>,
    pub offline_id: String,
    pub server_id: Option<i64>,
    pub tarea_id: i64,
    pub descripcion: String,
    pub porcentaje: Option<f64>,
    pub synced: bool,
    pub created_at: DateTime<Utc>,
}

impl Avance {
    pub fn new_offline(datos: NuevoAvance) -> Self {
        Self {
            local_id: None,
            offline_id: uuid::Uuid::new_v4().to_string(),
            server_id: None,
            tarea_id: datos.tarea_id,
            descripcion: datos.descripcion,
            porcentaje: datos.porcentaje,
            synced: false,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn mark_synced(&mut self, server_id: i64) {
        self.synced = true;
        self.server_id = Some(server_id);
    }
}
