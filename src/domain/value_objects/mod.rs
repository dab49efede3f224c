pub mod avance_creado;
pub mod nueva_foto;
pub mod nuevo_avance;
pub mod sync_operation;
pub mod tarea_update;

pub use avance_creado::AvanceCreado;
pub use nueva_foto::NuevaFoto;
pub use nuevo_avance::NuevoAvance;
pub use sync_operation::{SyncOperation, SyncOperationKind};
pub use tarea_update::TareaUpdate;
