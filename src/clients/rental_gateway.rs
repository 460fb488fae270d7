//! Gateway de alquileres (`/rentals`)

use serde::Serialize;

use crate::clients::api_client::{ApiClient, Resource};
use crate::models::rental::{Rental, RentalPayload};
use crate::utils::errors::AppResult;

const RENTALS: Resource = Resource::new("rentals");

#[derive(Debug, Clone, Copy, Default, Serialize)]
struct LimitQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

/// Operaciones sobre alquileres
#[async_trait::async_trait]
pub trait RentalOperations: Send + Sync {
    /// Listado; `limit` acota a los más recientes según el backend
    async fn list(&self, limit: Option<u32>) -> AppResult<Vec<Rental>>;
    async fn get(&self, id: i64) -> AppResult<Rental>;
    async fn create(&self, payload: &RentalPayload) -> AppResult<Rental>;
    async fn update(&self, id: i64, payload: &RentalPayload) -> AppResult<Rental>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Gateway HTTP de alquileres
#[derive(Clone)]
pub struct RentalGateway {
    api: ApiClient,
}

impl RentalGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl RentalOperations for RentalGateway {
    async fn list(&self, limit: Option<u32>) -> AppResult<Vec<Rental>> {
        self.api
            .get_with_query(&RENTALS.collection(), &LimitQuery { limit })
            .await
    }

    async fn get(&self, id: i64) -> AppResult<Rental> {
        self.api.get(&RENTALS.item(id)).await
    }

    async fn create(&self, payload: &RentalPayload) -> AppResult<Rental> {
        log::info!(
            "📅 Creando alquiler: scooter {} cliente {} ({} → {})",
            payload.scooter_id,
            payload.customer_id,
            payload.start_date,
            payload.end_date
        );
        self.api.post(&RENTALS.collection(), payload).await
    }

    async fn update(&self, id: i64, payload: &RentalPayload) -> AppResult<Rental> {
        log::info!("📅 Actualizando alquiler {}", id);
        self.api.put(&RENTALS.item(id), payload).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        log::info!("🗑️ Eliminando alquiler {}", id);
        self.api.delete(&RENTALS.item(id)).await
    }
}
