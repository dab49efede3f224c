pub mod avance;
pub mod foto_pendiente;
pub mod inventario_item;
pub mod obra;
pub mod sync_queue_entry;
pub mod tarea;
pub mod usuario;

pub use avance::Avance;
pub use foto_pendiente::FotoPendiente;
pub use inventario_item::InventarioItem;
pub use obra::Obra;
pub use sync_queue_entry::{DeadLetter, SyncQueueEntry};
pub use tarea::Tarea;
pub use usuario::Usuario;
