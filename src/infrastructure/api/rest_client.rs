use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::RemoteApi;
use crate::domain::entities::{Avance, FotoPendiente, InventarioItem, Obra, Tarea};
use crate::domain::value_objects::TareaUpdate;
use crate::shared::config::ApiConfig;
use crate::shared::error::{AppError, Result};

#[derive(Debug, Deserialize)]
struct ObrasResponse {
    obras: Vec<Obra>,
}

#[derive(Debug, Deserialize)]
struct TareasResponse {
    tareas: Vec<Tarea>,
}

#[derive(Debug, Deserialize)]
struct InventarioResponse {
    items: Vec<InventarioItem>,
}

/// Body for POST /api/offline/crear-avance. `offline_id` lets the server
/// deduplicate retried creations.
#[derive(Debug, Serialize)]
struct CrearAvanceRequest<'a> {
    tarea_id: i64,
    descripcion: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    porcentaje: Option<f64>,
    offline_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct CrearAvanceResponse {
    avance_id: i64,
}

/// reqwest-backed implementation of [`RemoteApi`] against the OBYRA backend.
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Remote {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl RemoteApi for RestClient {
    async fn descargar_obras(&self) -> Result<Vec<Obra>> {
        let url = format!("{}/api/offline/mis-obras", self.base_url);
        let response = self.client.get(&url).send().await?;
        let body: ObrasResponse = Self::ensure_success(response).await?.json().await?;
        Ok(body.obras)
    }

    async fn descargar_tareas(&self) -> Result<Vec<Tarea>> {
        let url = format!("{}/api/offline/mis-tareas", self.base_url);
        let response = self.client.get(&url).send().await?;
        let body: TareasResponse = Self::ensure_success(response).await?.json().await?;
        Ok(body.tareas)
    }

    async fn descargar_inventario(&self, limit: u32) -> Result<Vec<InventarioItem>> {
        let url = format!(
            "{}/api/offline/inventario-basico?limit={}",
            self.base_url, limit
        );
        let response = self.client.get(&url).send().await?;
        let body: InventarioResponse = Self::ensure_success(response).await?.json().await?;
        Ok(body.items)
    }

    async fn crear_avance(&self, avance: &Avance) -> Result<i64> {
        let url = format!("{}/api/offline/crear-avance", self.base_url);
        let request = CrearAvanceRequest {
            tarea_id: avance.tarea_id,
            descripcion: &avance.descripcion,
            porcentaje: avance.porcentaje,
            offline_id: &avance.offline_id,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let body: CrearAvanceResponse = Self::ensure_success(response).await?.json().await?;
        Ok(body.avance_id)
    }

    async fn actualizar_tarea(&self, tarea_id: i64, cambios: &TareaUpdate) -> Result<()> {
        let url = format!("{}/api/offline/actualizar-tarea/{}", self.base_url, tarea_id);
        let response = self.client.put(&url).json(cambios).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn subir_foto(&self, avance_id: i64, foto: &FotoPendiente) -> Result<()> {
        let url = format!("{}/api/avances/upload-foto", self.base_url);
        let part = Part::bytes(foto.datos.clone())
            .file_name(foto.filename.clone())
            .mime_str(&foto.mime_type)
            .map_err(|e| {
                AppError::InvalidInput(format!("Invalid mime type '{}': {}", foto.mime_type, e))
            })?;
        let form = Form::new()
            .text("avance_id", avance_id.to_string())
            .part("foto", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn get_json(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        Ok(body)
    }
}
