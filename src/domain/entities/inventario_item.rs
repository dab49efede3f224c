use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inventory item. Bulk-downloaded, read-only locally, searched by
/// substring on nombre/codigo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventarioItem {
    pub id: i64,
    pub codigo: String,
    pub categoria_id: Option<i64>,
    pub nombre: String,
    pub updated_at: DateTime<Utc>,
}
