//! Modelo de Rental
//!
//! Este módulo contiene el struct Rental (alquiler de un scooter a un cliente)
//! y su payload de escritura.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validation::{non_blank, validate_date_order, validate_non_negative_amount};

/// Estado del alquiler - valores tal como los guarda el backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RentalStatus {
    #[default]
    #[serde(rename = "Ενεργή")]
    Active,
    #[serde(rename = "Ολοκληρωμένη")]
    Completed,
    #[serde(rename = "Ακυρωμένη")]
    Cancelled,
}

impl RentalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RentalStatus::Active => "Ενεργή",
            RentalStatus::Completed => "Ολοκληρωμένη",
            RentalStatus::Cancelled => "Ακυρωμένη",
        }
    }

    /// Los alquileres activos y completados cuentan como ingreso
    pub fn counts_as_income(&self) -> bool {
        matches!(self, RentalStatus::Active | RentalStatus::Completed)
    }
}

/// Rental principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: i64,
    pub scooter_id: i64,
    pub customer_id: i64,
    #[serde(with = "crate::utils::dates::flexible_date")]
    pub start_date: NaiveDate,
    #[serde(with = "crate::utils::dates::flexible_date")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub status: RentalStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request para crear o actualizar un alquiler
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[validate(schema(function = "validate_rental_dates"))]
pub struct RentalPayload {
    pub scooter_id: i64,

    pub customer_id: i64,

    #[serde(with = "crate::utils::dates::flexible_date")]
    pub start_date: NaiveDate,

    #[serde(with = "crate::utils::dates::flexible_date")]
    pub end_date: NaiveDate,

    #[validate(custom = "validate_non_negative_amount")]
    pub total_price: Decimal,

    pub status: RentalStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn validate_rental_dates(payload: &RentalPayload) -> Result<(), ValidationError> {
    validate_date_order(payload.start_date, payload.end_date)
}

impl From<&Rental> for RentalPayload {
    fn from(rental: &Rental) -> Self {
        Self {
            scooter_id: rental.scooter_id,
            customer_id: rental.customer_id,
            start_date: rental.start_date,
            end_date: rental.end_date,
            total_price: rental.total_price.unwrap_or_default(),
            status: rental.status,
            notes: non_blank(rental.notes.clone()),
        }
    }
}
