use serde::{Deserialize, Serialize};

/// Partial edit of a tarea. Only the set fields travel to the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TareaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asignado_a: Option<String>,
}

impl TareaUpdate {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none() && self.estado.is_none() && self.asignado_a.is_none()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("update must set at least one field".to_string());
        }
        Ok(())
    }
}
