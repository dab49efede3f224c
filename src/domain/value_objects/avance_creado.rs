use crate::domain::entities::Avance;
use serde::{Deserialize, Serialize};

/// Outcome of the dual-path create: confirmed by the server on the spot, or
/// stored locally with a queue entry awaiting sync.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "origen", rename_all = "snake_case")]
pub enum AvanceCreado {
    Confirmado { avance: Avance },
    Offline { avance: Avance },
}

impl AvanceCreado {
    pub fn is_offline(&self) -> bool {
        matches!(self, AvanceCreado::Offline { .. })
    }

    pub fn avance(&self) -> &Avance {
        match self {
            AvanceCreado::Confirmado { avance } => avance,
            AvanceCreado::Offline { avance } => avance,
        }
    }

    pub fn into_avance(self) -> Avance {
        match self {
            AvanceCreado::Confirmado { avance } => avance,
            AvanceCreado::Offline { avance } => avance,
        }
    }
}
