//! Cliente HTTP para el backend REST del taller
//!
//! Un único `reqwest::Client` compartido por todos los gateways. Cada llamada
//! es un solo round trip: sin reintentos y sin cache.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

/// Cliente HTTP del backend
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Crear nuevo cliente a partir de la configuración del entorno
    pub fn new(config: &EnvironmentConfig) -> AppResult<Self> {
        Self::with_base_url(&config.api_base_url, config.request_timeout)
    }

    /// Crear nuevo cliente con URL base y timeout explícitos
    pub fn with_base_url(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("🌐 {} {}", method, url);
        self.client
            .request(method, url)
            .header("Accept", "application/json")
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        Self::decode(path, response).await
    }

    /// GET con parámetros de query; los campos `None` no se envían
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::decode(path, response).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::decode(path, response).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::decode(path, response).await
    }

    /// DELETE; el cuerpo de la respuesta, si existe, se ignora
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::check_status(path, response).await?;
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> AppResult<T> {
        let response = Self::check_status(path, response).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            log::error!("❌ Respuesta no decodificable de {}: {}", path, e);
            AppError::Decode(format!("{}: {}", path, e))
        })
    }

    async fn check_status(path: &str, response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        log::error!("❌ {} respondió {}: {}", path, status, body);

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(path.to_string()));
        }

        let message = extract_detail(&body)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| status.to_string());
        Err(AppError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// El backend devuelve `{"detail": "..."}` en sus errores
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

/// Rutas de un recurso REST: `/{name}/` para la colección, `/{name}/{id}` para un elemento
#[derive(Debug, Clone, Copy)]
pub struct Resource {
    name: &'static str,
}

impl Resource {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn collection(&self) -> String {
        format!("/{}/", self.name)
    }

    pub fn item(&self, id: i64) -> String {
        format!("/{}/{}", self.name, id)
    }

    pub fn action(&self, action: &str) -> String {
        format!("/{}/{}", self.name, action)
    }
}
