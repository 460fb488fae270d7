//! Gateway de scooters (`/scooters`)

use serde::Serialize;

use crate::clients::api_client::{ApiClient, Resource};
use crate::models::scooter::{Scooter, ScooterPayload};
use crate::utils::errors::AppResult;

const SCOOTERS: Resource = Resource::new("scooters");

/// Filtros del listado de scooters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScooterListFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ScooterListFilter {
    /// Scooters no vendidos, tal como los pide el formulario de alquiler
    pub fn available(limit: u32) -> Self {
        Self {
            available_only: Some(true),
            limit: Some(limit),
        }
    }
}

/// Operaciones sobre scooters
#[async_trait::async_trait]
pub trait ScooterOperations: Send + Sync {
    async fn list(&self, filter: ScooterListFilter) -> AppResult<Vec<Scooter>>;
    async fn get(&self, id: i64) -> AppResult<Scooter>;
    async fn create(&self, payload: &ScooterPayload) -> AppResult<Scooter>;
    async fn update(&self, id: i64, payload: &ScooterPayload) -> AppResult<Scooter>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Gateway HTTP de scooters
#[derive(Clone)]
pub struct ScooterGateway {
    api: ApiClient,
}

impl ScooterGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn warn_missing_sale_details(payload: &ScooterPayload) {
        let missing = payload.missing_sale_details();
        if !missing.is_empty() {
            log::warn!(
                "⚠️ Scooter marcado como vendido sin: {}",
                missing.join(", ")
            );
        }
    }
}

#[async_trait::async_trait]
impl ScooterOperations for ScooterGateway {
    async fn list(&self, filter: ScooterListFilter) -> AppResult<Vec<Scooter>> {
        self.api
            .get_with_query(&SCOOTERS.collection(), &filter)
            .await
    }

    async fn get(&self, id: i64) -> AppResult<Scooter> {
        self.api.get(&SCOOTERS.item(id)).await
    }

    async fn create(&self, payload: &ScooterPayload) -> AppResult<Scooter> {
        Self::warn_missing_sale_details(payload);
        log::info!("🛵 Creando scooter: {} {}", payload.brand, payload.model);
        self.api.post(&SCOOTERS.collection(), payload).await
    }

    async fn update(&self, id: i64, payload: &ScooterPayload) -> AppResult<Scooter> {
        Self::warn_missing_sale_details(payload);
        log::info!("🛵 Actualizando scooter {}", id);
        self.api.put(&SCOOTERS.item(id), payload).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        log::info!("🗑️ Eliminando scooter {}", id);
        self.api.delete(&SCOOTERS.item(id)).await
    }
}
