//! Gateway de clientes (`/customers`)

use crate::clients::api_client::{ApiClient, Resource};
use crate::models::customer::{Customer, CustomerPayload};
use crate::utils::errors::AppResult;

const CUSTOMERS: Resource = Resource::new("customers");

/// Operaciones sobre clientes
#[async_trait::async_trait]
pub trait CustomerOperations: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Customer>>;
    async fn get(&self, id: i64) -> AppResult<Customer>;
    async fn create(&self, payload: &CustomerPayload) -> AppResult<Customer>;
    async fn update(&self, id: i64, payload: &CustomerPayload) -> AppResult<Customer>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Gateway HTTP de clientes
#[derive(Clone)]
pub struct CustomerGateway {
    api: ApiClient,
}

impl CustomerGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl CustomerOperations for CustomerGateway {
    async fn list(&self) -> AppResult<Vec<Customer>> {
        self.api.get(&CUSTOMERS.collection()).await
    }

    async fn get(&self, id: i64) -> AppResult<Customer> {
        self.api.get(&CUSTOMERS.item(id)).await
    }

    async fn create(&self, payload: &CustomerPayload) -> AppResult<Customer> {
        log::info!("👤 Creando cliente: {}", payload.name);
        self.api.post(&CUSTOMERS.collection(), payload).await
    }

    async fn update(&self, id: i64, payload: &CustomerPayload) -> AppResult<Customer> {
        log::info!("👤 Actualizando cliente {}", id);
        self.api.put(&CUSTOMERS.item(id), payload).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        log::info!("🗑️ Eliminando cliente {}", id);
        self.api.delete(&CUSTOMERS.item(id)).await
    }
}
