//! Modelo de Service
//!
//! Órdenes de servicio del taller. `scooter_info` es texto libre, no una
//! referencia estricta a un Scooter.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{non_blank, validate_non_negative_amount, validate_not_blank};

/// Tipo de servicio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "Τακτικό Service")]
    RegularService,
    #[serde(rename = "Επισκευή Βλάβης")]
    FaultRepair,
    #[serde(rename = "Αλλαγή Λαδιών")]
    OilChange,
    #[serde(rename = "Αλλαγή Ελαστικών")]
    TyreChange,
    #[serde(rename = "Έλεγχος")]
    Inspection,
    #[serde(rename = "Άλλο")]
    Other,
}

impl ServiceType {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::RegularService => "Τακτικό Service",
            ServiceType::FaultRepair => "Επισκευή Βλάβης",
            ServiceType::OilChange => "Αλλαγή Λαδιών",
            ServiceType::TyreChange => "Αλλαγή Ελαστικών",
            ServiceType::Inspection => "Έλεγχος",
            ServiceType::Other => "Άλλο",
        }
    }
}

/// Estado de la orden de servicio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ServiceStatus {
    #[default]
    #[serde(rename = "Σε εξέλιξη")]
    InProgress,
    #[serde(rename = "Ολοκληρώθηκε")]
    Completed,
    #[serde(rename = "Ακυρώθηκε")]
    Cancelled,
    #[serde(rename = "Αναμονή ανταλλακτικών")]
    AwaitingParts,
}

impl ServiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceStatus::InProgress => "Σε εξέλιξη",
            ServiceStatus::Completed => "Ολοκληρώθηκε",
            ServiceStatus::Cancelled => "Ακυρώθηκε",
            ServiceStatus::AwaitingParts => "Αναμονή ανταλλακτικών",
        }
    }

    pub fn is_pending(&self) -> bool {
        !matches!(self, ServiceStatus::Completed)
    }
}

/// Service principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub scooter_info: String,
    pub service_type: ServiceType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "crate::utils::dates::flexible_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub status: ServiceStatus,
}

/// Request para crear o actualizar una orden de servicio
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct ServicePayload {
    #[validate(custom = "validate_not_blank")]
    pub scooter_info: String,

    pub service_type: ServiceType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(with = "crate::utils::dates::flexible_date")]
    pub date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_non_negative_amount")]
    pub cost: Option<Decimal>,

    pub status: ServiceStatus,
}

impl ServicePayload {
    /// Un servicio con coste genera una transacción de ingreso en el backend
    pub fn produces_income(&self) -> bool {
        self.cost.map_or(false, |cost| cost > Decimal::ZERO)
    }
}

impl From<&Service> for ServicePayload {
    fn from(service: &Service) -> Self {
        Self {
            scooter_info: service.scooter_info.clone(),
            service_type: service.service_type,
            description: non_blank(service.description.clone()),
            date: service.date,
            cost: service.cost,
            status: service.status,
        }
    }
}
