use serde::{Deserialize, Serialize};

/// Input for creating an avance, validated before it touches the store or
/// the network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NuevoAvance {
    pub tarea_id: i64,
    pub descripcion: String,
    pub porcentaje: Option<f64>,
}

impl NuevoAvance {
    pub fn validate(&self) -> Result<(), String> {
        if self.tarea_id <= 0 {
            return Err("tarea_id must be positive".to_string());
        }
        if self.descripcion.trim().is_empty() {
            return Err("descripcion cannot be empty".to_string());
        }
        if let Some(p) = self.porcentaje {
            if !(0.0..=100.0).contains(&p) {
                return Err("porcentaje must be between 0 and 100".to_string());
            }
        }
        Ok(())
    }
}
