use serde::{Deserialize, Serialize};

/// Photo attachment captured in the field, carried as raw bytes until the
/// upload goes through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NuevaFoto {
    pub filename: String,
    pub mime_type: String,
    pub datos: Vec<u8>,
}

impl NuevaFoto {
    pub fn validate(&self) -> Result<(), String> {
        if self.filename.trim().is_empty() {
            return Err("filename cannot be empty".to_string());
        }
        if self.mime_type.trim().is_empty() {
            return Err("mime_type cannot be empty".to_string());
        }
        if self.datos.is_empty() {
            return Err("foto payload cannot be empty".to_string());
        }
        Ok(())
    }
}
