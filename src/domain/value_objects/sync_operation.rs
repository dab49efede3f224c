use serde::{Deserialize, Serialize};
use std::fmt;

use super::TareaUpdate;

/// Mutating operation held in the sync queue, stored as tagged JSON so the
/// coordinator's dispatch is exhaustively checked instead of matching on
/// runtime strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum SyncOperation {
    CrearAvance {
        offline_id: String,
        tarea_id: i64,
        descripcion: String,
        porcentaje: Option<f64>,
    },
    ActualizarTarea {
        tarea_id: i64,
        cambios: TareaUpdate,
    },
    SubirFoto {
        foto_id: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncOperationKind {
    CrearAvance,
    ActualizarTarea,
    SubirFoto,
}

impl SyncOperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncOperationKind::CrearAvance => "crear_avance",
            SyncOperationKind::ActualizarTarea => "actualizar_tarea",
            SyncOperationKind::SubirFoto => "subir_foto",
        }
    }

    pub fn http_method(&self) -> &'static str {
        match self {
            SyncOperationKind::CrearAvance => "POST",
            SyncOperationKind::ActualizarTarea => "PUT",
            SyncOperationKind::SubirFoto => "POST",
        }
    }
}

impl fmt::Display for SyncOperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SyncOperation {
    pub fn kind(&self) -> SyncOperationKind {
        match self {
            SyncOperation::CrearAvance { .. } => SyncOperationKind::CrearAvance,
            SyncOperation::ActualizarTarea { .. } => SyncOperationKind::ActualizarTarea,
            SyncOperation::SubirFoto { .. } => SyncOperationKind::SubirFoto,
        }
    }

    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
