#![allow(unused_imports)]

pub mod entities;
pub mod value_objects;

pub use entities::{
    Avance, DeadLetter, FotoPendiente, InventarioItem, Obra, SyncQueueEntry, Tarea, Usuario,
};
pub use value_objects::{
    AvanceCreado, NuevaFoto, NuevoAvance, SyncOperation, SyncOperationKind, TareaUpdate,
};
