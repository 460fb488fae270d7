//! Venta de recambios
//!
//! La venta es una única petición `POST /spare-parts/sell`: el backend
//! descuenta el stock y registra el ingreso `parts_sale` a la vez. El cliente
//! no intenta recuperar fallos parciales.
//!
//! `sale_price` es el importe total de la línea. Mientras sea `Auto` vale
//! `selling_price × quantity`; si el operador lo edita pasa a `Manual`.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info};
use validator::Validate;

use crate::clients::SparePartOperations;
use crate::events::{ChangeOrigin, EventBus};
use crate::models::spare_part::{SellSparePartRequest, SparePart, SparePartPayload};
use crate::services::rental_pricing::{DerivedPrice, PriceSource};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::money::round_money;
use crate::utils::validation::non_blank;

/// Estado del formulario de venta
#[derive(Debug, Clone, PartialEq)]
pub struct SaleForm {
    parts: Vec<SparePart>,
    selected: Option<SparePart>,
    quantity: i32,
    sale_price: DerivedPrice,
    customer_name: Option<String>,
    notes: Option<String>,
}

impl SaleForm {
    /// Sólo se ofrecen recambios con stock
    pub fn new(parts: Vec<SparePart>) -> Self {
        Self {
            parts: parts.into_iter().filter(SparePart::is_in_stock).collect(),
            selected: None,
            quantity: 1,
            sale_price: DerivedPrice::default(),
            customer_name: None,
            notes: None,
        }
    }

    pub fn parts(&self) -> &[SparePart] {
        &self.parts
    }

    pub fn selected(&self) -> Option<&SparePart> {
        self.selected.as_ref()
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn sale_price(&self) -> Option<Decimal> {
        self.sale_price.value()
    }

    pub fn sale_price_source(&self) -> PriceSource {
        self.sale_price.source()
    }

    /// Cantidad máxima vendible del recambio seleccionado
    pub fn max_quantity(&self) -> Option<i32> {
        self.selected.as_ref().map(|part| part.stock)
    }

    fn default_price(&self) -> Option<Decimal> {
        let unit = self.selected.as_ref()?.selling_price?;
        Some(round_money(unit * Decimal::from(self.quantity)))
    }

    fn refresh_price(&mut self) {
        let computed = self.default_price();
        self.sale_price.recompute(computed);
    }

    pub fn select_part(&mut self, part_id: i64) -> AppResult<()> {
        let part = self
            .parts
            .iter()
            .find(|part| part.id == part_id)
            .cloned()
            .ok_or_else(|| {
                validation_error(
                    "spare_part_id",
                    "unavailable",
                    "Το ανταλλακτικό δεν είναι διαθέσιμο για πώληση.",
                )
            })?;
        self.selected = Some(part);
        self.refresh_price();
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: i32) {
        self.quantity = quantity;
        self.refresh_price();
    }

    /// El operador escribe el importe a mano
    pub fn set_sale_price(&mut self, price: Option<Decimal>) {
        self.sale_price.set_manual(price);
    }

    pub fn set_customer_name(&mut self, name: Option<String>) {
        self.customer_name = non_blank(name);
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = non_blank(notes);
    }

    /// El envío está deshabilitado hasta que el formulario sea válido
    pub fn can_submit(&self) -> bool {
        self.to_request().is_ok()
    }

    /// Validar y construir la petición; nunca produce una venta que se sepa
    /// inválida (sin recambio, cantidad fuera de `[1, stock]`).
    pub fn to_request(&self) -> AppResult<SellSparePartRequest> {
        let part = self.selected.as_ref().ok_or_else(|| {
            validation_error(
                "spare_part_id",
                "required",
                "Παρακαλώ επιλέξτε ανταλλακτικό.",
            )
        })?;

        if self.quantity < 1 || self.quantity > part.stock {
            return Err(validation_error(
                "quantity",
                "stock",
                &format!("Η ποσότητα πρέπει να είναι από 1 έως {}.", part.stock),
            ));
        }

        let sale_price = self.sale_price.value().ok_or_else(|| {
            validation_error(
                "sale_price",
                "required",
                "Παρακαλώ εισάγετε τιμή πώλησης.",
            )
        })?;

        let request = SellSparePartRequest {
            spare_part_id: part.id,
            quantity: self.quantity,
            sale_price,
            customer_name: self.customer_name.clone(),
            notes: self.notes.clone(),
        };
        request.validate()?;
        Ok(request)
    }
}

/// Servicio de recambios y ventas
#[derive(Clone)]
pub struct SparePartSaleService {
    parts: Arc<dyn SparePartOperations>,
    events: EventBus,
}

impl SparePartSaleService {
    pub fn new(parts: Arc<dyn SparePartOperations>, events: EventBus) -> Self {
        Self { parts, events }
    }

    pub async fn prepare_sale(&self) -> AppResult<SaleForm> {
        let parts = self.parts.list().await.map_err(|e| {
            error!("❌ Error cargando recambios: {}", e);
            e
        })?;
        Ok(SaleForm::new(parts))
    }

    /// Registrar la venta con una sola llamada y publicar el cambio
    pub async fn sell(&self, form: &SaleForm) -> AppResult<serde_json::Value> {
        let request = form.to_request()?;

        let response = self.parts.sell(&request).await.map_err(|e| {
            error!("❌ Error registrando la venta: {}", e);
            e
        })?;

        info!(
            "✅ Venta registrada: recambio {} x{} = {}",
            request.spare_part_id, request.quantity, request.sale_price
        );
        self.events.publish(ChangeOrigin::SparePartSale);
        Ok(response)
    }

    pub async fn list(&self) -> AppResult<Vec<SparePart>> {
        self.parts.list().await
    }

    /// Recambios en o por debajo de su umbral de reposición
    pub async fn low_stock(&self) -> AppResult<Vec<SparePart>> {
        let parts = self.parts.list().await?;
        Ok(parts.into_iter().filter(SparePart::is_low_stock).collect())
    }

    pub async fn create(&self, payload: SparePartPayload) -> AppResult<SparePart> {
        let payload = payload.normalized();
        payload.validate()?;
        self.parts.create(&payload).await
    }

    pub async fn update(&self, part_id: i64, payload: SparePartPayload) -> AppResult<SparePart> {
        let payload = payload.normalized();
        payload.validate()?;
        self.parts.update(part_id, &payload).await
    }

    pub async fn delete(&self, part_id: i64) -> AppResult<()> {
        self.parts.delete(part_id).await
    }
}
