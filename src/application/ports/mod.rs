#![allow(unused_imports)]

pub mod local_store;
pub mod remote_api;

pub use local_store::{
    AvanceRepository, CachedResponse, ConfigRepository, FotoRepository, InventarioRepository,
    ObraRepository, ResponseCacheRepository, Store, SyncQueueRepository, TareaRepository,
    UsuarioRepository,
};
pub use remote_api::RemoteApi;
