//! Servicio de alquileres
//!
//! Prepara el formulario de alquiler (scooters disponibles y clientes),
//! valida el borrador, envía el alquiler y avisa a la vista financiera.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info};
use validator::Validate;

use crate::clients::{
    CustomerOperations, RentalOperations, ScooterListFilter, ScooterOperations,
};
use crate::events::{ChangeOrigin, EventBus};
use crate::models::customer::Customer;
use crate::models::rental::{Rental, RentalPayload, RentalStatus};
use crate::models::scooter::Scooter;
use crate::services::rental_pricing::RentalPricing;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{non_blank, validate_date_order};

/// Límite con el que se piden los scooters disponibles para el selector
pub const AVAILABLE_SCOOTERS_LIMIT: u32 = 1000;

const REQUIRED_FIELDS_MESSAGE: &str = "Παρακαλώ συμπληρώστε όλα τα υποχρεωτικά πεδία.";

/// Borrador del formulario de alquiler
#[derive(Debug, Clone, PartialEq)]
pub struct RentalDraft {
    pub scooter_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub status: RentalStatus,
    pub notes: Option<String>,
    pub pricing: RentalPricing,
}

impl RentalDraft {
    pub fn new(default_daily_rate: Decimal) -> Self {
        Self {
            scooter_id: None,
            customer_id: None,
            status: RentalStatus::default(),
            notes: None,
            pricing: RentalPricing::new(default_daily_rate),
        }
    }

    pub fn from_rental(rental: &Rental, default_daily_rate: Decimal) -> Self {
        Self {
            scooter_id: Some(rental.scooter_id),
            customer_id: Some(rental.customer_id),
            status: rental.status,
            notes: rental.notes.clone(),
            pricing: RentalPricing::for_rental(rental, default_daily_rate),
        }
    }

    /// Validar el borrador y construir el payload.
    ///
    /// Cualquier error es local: no se hace ninguna llamada de red.
    pub fn to_payload(&self) -> AppResult<RentalPayload> {
        let scooter_id = self
            .scooter_id
            .ok_or_else(|| validation_error("scooter_id", "required", REQUIRED_FIELDS_MESSAGE))?;
        let customer_id = self
            .customer_id
            .ok_or_else(|| validation_error("customer_id", "required", REQUIRED_FIELDS_MESSAGE))?;
        let start_date = self
            .pricing
            .start_date()
            .ok_or_else(|| validation_error("start_date", "required", REQUIRED_FIELDS_MESSAGE))?;
        let end_date = self
            .pricing
            .end_date()
            .ok_or_else(|| validation_error("end_date", "required", REQUIRED_FIELDS_MESSAGE))?;

        if let Err(order) = validate_date_order(start_date, end_date) {
            let message = order
                .message
                .as_deref()
                .unwrap_or("end_date must be after start_date")
                .to_string();
            return Err(validation_error("end_date", "date_order", &message));
        }

        let payload = RentalPayload {
            scooter_id,
            customer_id,
            start_date,
            end_date,
            total_price: self.pricing.submission_total(),
            status: self.status,
            notes: non_blank(self.notes.clone()),
        };
        payload.validate()?;
        Ok(payload)
    }
}

/// Datos del formulario de alquiler listos para mostrar
#[derive(Debug, Clone)]
pub struct RentalForm {
    pub scooters: Vec<Scooter>,
    pub customers: Vec<Customer>,
    pub draft: RentalDraft,
}

/// Ingresos por alquileres: activos y completados, total ausente cuenta 0
pub fn rental_income(rentals: &[Rental]) -> Decimal {
    rentals
        .iter()
        .filter(|rental| rental.status.counts_as_income())
        .filter_map(|rental| rental.total_price)
        .sum()
}

/// Servicio de alquileres
#[derive(Clone)]
pub struct RentalService {
    rentals: Arc<dyn RentalOperations>,
    scooters: Arc<dyn ScooterOperations>,
    customers: Arc<dyn CustomerOperations>,
    events: EventBus,
    default_daily_rate: Decimal,
}

impl RentalService {
    pub fn new(
        rentals: Arc<dyn RentalOperations>,
        scooters: Arc<dyn ScooterOperations>,
        customers: Arc<dyn CustomerOperations>,
        events: EventBus,
        default_daily_rate: Decimal,
    ) -> Self {
        Self {
            rentals,
            scooters,
            customers,
            events,
            default_daily_rate,
        }
    }

    /// Preparar el formulario; con `rental_id` carga además el alquiler y
    /// añade su scooter y cliente a las listas si no aparecen en ellas.
    pub async fn prepare_form(&self, rental_id: Option<i64>) -> AppResult<RentalForm> {
        let (mut scooters, mut customers) = futures::try_join!(
            self.scooters
                .list(ScooterListFilter::available(AVAILABLE_SCOOTERS_LIMIT)),
            self.customers.list(),
        )
        .map_err(|e| {
            error!("❌ Error preparando formulario de alquiler: {}", e);
            e
        })?;

        let Some(rental_id) = rental_id else {
            return Ok(RentalForm {
                scooters,
                customers,
                draft: RentalDraft::new(self.default_daily_rate),
            });
        };

        let rental = self.rentals.get(rental_id).await?;

        if !scooters.iter().any(|s| s.id == rental.scooter_id) {
            scooters.push(self.scooters.get(rental.scooter_id).await?);
        }
        if !customers.iter().any(|c| c.id == rental.customer_id) {
            customers.push(self.customers.get(rental.customer_id).await?);
        }

        Ok(RentalForm {
            scooters,
            customers,
            draft: RentalDraft::from_rental(&rental, self.default_daily_rate),
        })
    }

    /// Crear (`rental_id = None`) o actualizar un alquiler y publicar el cambio
    pub async fn submit(&self, rental_id: Option<i64>, draft: &RentalDraft) -> AppResult<Rental> {
        let payload = draft.to_payload()?;

        let result = match rental_id {
            Some(id) => self.rentals.update(id, &payload).await,
            None => self.rentals.create(&payload).await,
        };

        let rental = result.map_err(|e| {
            error!("❌ Error guardando alquiler: {}", e);
            e
        })?;

        info!("✅ Alquiler {} guardado ({})", rental.id, rental.status.label());
        self.events.publish(ChangeOrigin::Rental);
        Ok(rental)
    }

    pub async fn list(&self, limit: Option<u32>) -> AppResult<Vec<Rental>> {
        self.rentals.list(limit).await
    }

    pub async fn delete(&self, rental_id: i64) -> AppResult<()> {
        self.rentals.delete(rental_id).await
    }

    /// Ingresos por alquileres sobre el listado completo
    pub async fn rental_income(&self) -> AppResult<Decimal> {
        let rentals = self.rentals.list(None).await?;
        Ok(rental_income(&rentals))
    }
}
