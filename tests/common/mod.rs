#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use obyra_sync::domain::entities::{Avance, FotoPendiente, InventarioItem, Obra, Tarea};
use obyra_sync::domain::value_objects::{NuevaFoto, NuevoAvance, TareaUpdate};
use obyra_sync::ports::RemoteApi;
use obyra_sync::shared::config::DatabaseConfig;
use obyra_sync::{AppConfig, AppContext, AppError};
use tokio::sync::Mutex;

/// Every remote call a test run observed, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    DescargarObras,
    DescargarTareas,
    DescargarInventario { limit: u32 },
    CrearAvance { offline_id: String, tarea_id: i64 },
    ActualizarTarea { tarea_id: i64 },
    SubirFoto { avance_id: i64 },
    GetJson { path: String },
}

/// Scripted stand-in for the HTTP client. Mutating calls consume queued
/// results (defaulting to success), download calls return whatever snapshot
/// the test installed, and everything is recorded for order assertions.
pub struct ScriptedApi {
    obras: Mutex<Vec<Obra>>,
    tareas: Mutex<Vec<Tarea>>,
    inventario: Mutex<Vec<InventarioItem>>,
    json_bodies: Mutex<HashMap<String, String>>,
    crear_avance_results: Mutex<VecDeque<Result<i64, AppError>>>,
    actualizar_results: Mutex<VecDeque<Result<(), AppError>>>,
    subir_foto_results: Mutex<VecDeque<Result<(), AppError>>>,
    next_server_id: AtomicI64,
    delay_ms: AtomicU64,
    calls: Mutex<Vec<ApiCall>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            obras: Mutex::new(Vec::new()),
            tareas: Mutex::new(Vec::new()),
            inventario: Mutex::new(Vec::new()),
            json_bodies: Mutex::new(HashMap::new()),
            crear_avance_results: Mutex::new(VecDeque::new()),
            actualizar_results: Mutex::new(VecDeque::new()),
            subir_foto_results: Mutex::new(VecDeque::new()),
            next_server_id: AtomicI64::new(900),
            delay_ms: AtomicU64::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn set_obras(&self, obras: Vec<Obra>) {
        *self.obras.lock().await = obras;
    }

    pub async fn set_tareas(&self, tareas: Vec<Tarea>) {
        *self.tareas.lock().await = tareas;
    }

    pub async fn set_inventario(&self, items: Vec<InventarioItem>) {
        *self.inventario.lock().await = items;
    }

    pub async fn set_json_body(&self, path: &str, body: &str) {
        self.json_bodies
            .lock()
            .await
            .insert(path.to_string(), body.to_string());
    }

    pub async fn push_crear_avance_result(&self, result: Result<i64, AppError>) {
        self.crear_avance_results.lock().await.push_back(result);
    }

    pub async fn push_actualizar_result(&self, result: Result<(), AppError>) {
        self.actualizar_results.lock().await.push_back(result);
    }

    pub async fn push_subir_foto_result(&self, result: Result<(), AppError>) {
        self.subir_foto_results.lock().await.push_back(result);
    }

    /// Makes every mutating call take this long, to hold a sync pass open
    /// while a test races a second trigger against it.
    pub fn set_delay_ms(&self, millis: u64) {
        self.delay_ms.store(millis, Ordering::SeqCst);
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().await.clone()
    }

    pub async fn count_calls(&self, matches: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.lock().await.iter().filter(|c| matches(c)).count()
    }

    async fn record(&self, call: ApiCall) {
        self.calls.lock().await.push(call);
    }

    async fn pause(&self) {
        let millis = self.delay_ms.load(Ordering::SeqCst);
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteApi for ScriptedApi {
    async fn descargar_obras(&self) -> Result<Vec<Obra>, AppError> {
        self.record(ApiCall::DescargarObras).await;
        Ok(self.obras.lock().await.clone())
    }

    async fn descargar_tareas(&self) -> Result<Vec<Tarea>, AppError> {
        self.record(ApiCall::DescargarTareas).await;
        Ok(self.tareas.lock().await.clone())
    }

    async fn descargar_inventario(&self, limit: u32) -> Result<Vec<InventarioItem>, AppError> {
        self.record(ApiCall::DescargarInventario { limit }).await;
        Ok(self.inventario.lock().await.clone())
    }

    async fn crear_avance(&self, avance: &Avance) -> Result<i64, AppError> {
        self.record(ApiCall::CrearAvance {
            offline_id: avance.offline_id.clone(),
            tarea_id: avance.tarea_id,
        })
        .await;
        self.pause().await;
        match self.crear_avance_results.lock().await.pop_front() {
            Some(result) => result,
            None => Ok(self.next_server_id.fetch_add(1, Ordering::SeqCst)),
        }
    }

    async fn actualizar_tarea(&self, tarea_id: i64, _cambios: &TareaUpdate) -> Result<(), AppError> {
        self.record(ApiCall::ActualizarTarea { tarea_id }).await;
        self.pause().await;
        self.actualizar_results
            .lock()
            .await
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn subir_foto(&self, avance_id: i64, _foto: &FotoPendiente) -> Result<(), AppError> {
        self.record(ApiCall::SubirFoto { avance_id }).await;
        self.pause().await;
        self.subir_foto_results
            .lock()
            .await
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn get_json(&self, path: &str) -> Result<String, AppError> {
        self.record(ApiCall::GetJson {
            path: path.to_string(),
        })
        .await;
        match self.json_bodies.lock().await.get(path) {
            Some(body) => Ok(body.clone()),
            None => Err(AppError::Network(format!("no scripted body for {path}"))),
        }
    }
}

pub struct SyncTestContext {
    pub context: AppContext,
    pub api: Arc<ScriptedApi>,
}

pub async fn setup_context() -> SyncTestContext {
    setup_context_with(Arc::new(ScriptedApi::new()), memory_config()).await
}

pub async fn setup_context_with(api: Arc<ScriptedApi>, config: AppConfig) -> SyncTestContext {
    let context = AppContext::init_with_api(config, Arc::clone(&api) as Arc<dyn RemoteApi>)
        .await
        .expect("init context");
    SyncTestContext { context, api }
}

pub fn memory_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: ":memory:".to_string(),
            max_connections: 1,
            connection_timeout: 30,
        },
        ..AppConfig::default()
    }
}

pub fn file_config(path: &std::path::Path) -> AppConfig {
    let mut config = memory_config();
    config.database.url = format!("sqlite://{}?mode=rwc", path.display());
    config
}

pub fn nuevo_avance(tarea_id: i64) -> NuevoAvance {
    NuevoAvance {
        tarea_id,
        descripcion: "Hormigonado de losa nivel 2".to_string(),
        porcentaje: Some(60.0),
    }
}

pub fn nueva_foto() -> NuevaFoto {
    NuevaFoto {
        filename: "losa-nivel-2.jpg".to_string(),
        mime_type: "image/jpeg".to_string(),
        datos: vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10],
    }
}

pub fn estado_update(estado: &str) -> TareaUpdate {
    TareaUpdate {
        estado: Some(estado.to_string()),
        ..TareaUpdate::default()
    }
}

pub fn obra(id: i64, nombre: &str) -> Obra {
    Obra {
        id,
        nombre: nombre.to_string(),
        estado: "en_ejecucion".to_string(),
        updated_at: Utc::now(),
    }
}

pub fn tarea(id: i64, obra_id: i64) -> Tarea {
    Tarea {
        id,
        obra_id,
        nombre: format!("Tarea {id}"),
        estado: "pendiente".to_string(),
        asignado_a: None,
        updated_at: Utc::now(),
    }
}

pub fn item(id: i64, codigo: &str) -> InventarioItem {
    InventarioItem {
        id,
        codigo: codigo.to_string(),
        categoria_id: Some(1),
        nombre: format!("Material {codigo}"),
        updated_at: Utc::now(),
    }
}
