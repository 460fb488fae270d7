//! Gateway de recambios (`/spare-parts`) y venta atómica (`/spare-parts/sell`)

use crate::clients::api_client::{ApiClient, Resource};
use crate::models::spare_part::{SellSparePartRequest, SparePart, SparePartPayload};
use crate::utils::errors::AppResult;

const SPARE_PARTS: Resource = Resource::new("spare-parts");

/// Operaciones sobre recambios
#[async_trait::async_trait]
pub trait SparePartOperations: Send + Sync {
    async fn list(&self) -> AppResult<Vec<SparePart>>;
    async fn get(&self, id: i64) -> AppResult<SparePart>;
    async fn create(&self, payload: &SparePartPayload) -> AppResult<SparePart>;
    async fn update(&self, id: i64, payload: &SparePartPayload) -> AppResult<SparePart>;
    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Venta: el backend descuenta stock y registra el ingreso en una sola operación
    async fn sell(&self, request: &SellSparePartRequest) -> AppResult<serde_json::Value>;
}

/// Gateway HTTP de recambios
#[derive(Clone)]
pub struct SparePartGateway {
    api: ApiClient,
}

impl SparePartGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl SparePartOperations for SparePartGateway {
    async fn list(&self) -> AppResult<Vec<SparePart>> {
        self.api.get(&SPARE_PARTS.collection()).await
    }

    async fn get(&self, id: i64) -> AppResult<SparePart> {
        self.api.get(&SPARE_PARTS.item(id)).await
    }

    async fn create(&self, payload: &SparePartPayload) -> AppResult<SparePart> {
        log::info!("🔩 Creando recambio: {}", payload.name);
        self.api.post(&SPARE_PARTS.collection(), payload).await
    }

    async fn update(&self, id: i64, payload: &SparePartPayload) -> AppResult<SparePart> {
        log::info!("🔩 Actualizando recambio {}", id);
        self.api.put(&SPARE_PARTS.item(id), payload).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        log::info!("🗑️ Eliminando recambio {}", id);
        self.api.delete(&SPARE_PARTS.item(id)).await
    }

    async fn sell(&self, request: &SellSparePartRequest) -> AppResult<serde_json::Value> {
        log::info!(
            "💶 Venta de recambio {}: {} uds por {}",
            request.spare_part_id,
            request.quantity,
            request.sale_price
        );
        self.api.post(&SPARE_PARTS.action("sell"), request).await
    }
}
