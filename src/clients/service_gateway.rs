//! Gateway de órdenes de servicio (`/services`)

use crate::clients::api_client::{ApiClient, Resource};
use crate::models::service::{Service, ServicePayload};
use crate::utils::errors::AppResult;

const SERVICES: Resource = Resource::new("services");

/// Operaciones sobre órdenes de servicio
#[async_trait::async_trait]
pub trait ServiceOperations: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Service>>;
    async fn get(&self, id: i64) -> AppResult<Service>;
    async fn create(&self, payload: &ServicePayload) -> AppResult<Service>;
    async fn update(&self, id: i64, payload: &ServicePayload) -> AppResult<Service>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Gateway HTTP de órdenes de servicio
#[derive(Clone)]
pub struct ServiceGateway {
    api: ApiClient,
}

impl ServiceGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl ServiceOperations for ServiceGateway {
    async fn list(&self) -> AppResult<Vec<Service>> {
        self.api.get(&SERVICES.collection()).await
    }

    async fn get(&self, id: i64) -> AppResult<Service> {
        self.api.get(&SERVICES.item(id)).await
    }

    async fn create(&self, payload: &ServicePayload) -> AppResult<Service> {
        log::info!("🔧 Creando servicio: {}", payload.scooter_info);
        self.api.post(&SERVICES.collection(), payload).await
    }

    async fn update(&self, id: i64, payload: &ServicePayload) -> AppResult<Service> {
        log::info!("🔧 Actualizando servicio {}", id);
        self.api.put(&SERVICES.item(id), payload).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        log::info!("🗑️ Eliminando servicio {}", id);
        self.api.delete(&SERVICES.item(id)).await
    }
}
