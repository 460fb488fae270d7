//! Modelo de Scooter
//!
//! Este módulo contiene el struct Scooter (inventario de venta y alquiler)
//! y su payload de escritura.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{non_blank, validate_non_negative_amount, validate_not_blank};

/// Estado del scooter - valores tal como los guarda el backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScooterCondition {
    #[serde(rename = "Καινούργιο")]
    New,
    #[default]
    #[serde(rename = "Μεταχειρισμένο")]
    Used,
}

impl ScooterCondition {
    pub fn label(&self) -> &'static str {
        match self {
            ScooterCondition::New => "Καινούργιο",
            ScooterCondition::Used => "Μεταχειρισμένο",
        }
    }
}

/// Scooter principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scooter {
    pub id: i64,
    #[serde(default)]
    pub plate: Option<String>,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub condition: ScooterCondition,
    #[serde(default)]
    pub is_sold: bool,
    #[serde(default, with = "crate::utils::dates::flexible_date_option")]
    pub sold_date: Option<NaiveDate>,
    #[serde(default)]
    pub sold_to_customer_id: Option<i64>,
    #[serde(default)]
    pub purchase_price: Option<Decimal>,
    #[serde(default)]
    pub selling_price: Option<Decimal>,
}

impl Scooter {
    /// Disponible para alquiler o venta
    pub fn is_available(&self) -> bool {
        !self.is_sold
    }

    /// Texto para selectores: `Piaggio Liberty (ABC-1234) - 2021`
    pub fn display_name(&self) -> String {
        let mut name = format!("{} {}", self.brand, self.model);
        if let Some(plate) = self.plate.as_deref().filter(|p| !p.is_empty()) {
            name.push_str(&format!(" ({})", plate));
        }
        if let Some(year) = self.year {
            name.push_str(&format!(" - {}", year));
        }
        name
    }
}

/// Request para crear o actualizar un scooter
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct ScooterPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate: Option<String>,

    #[validate(custom = "validate_not_blank")]
    pub brand: String,

    #[validate(custom = "validate_not_blank")]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_non_negative_amount")]
    pub price: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub condition: ScooterCondition,

    pub is_sold: bool,

    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::dates::flexible_date_option"
    )]
    pub sold_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold_to_customer_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_non_negative_amount")]
    pub purchase_price: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_non_negative_amount")]
    pub selling_price: Option<Decimal>,
}

impl ScooterPayload {
    pub fn new(brand: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            plate: None,
            brand: brand.into(),
            model: model.into(),
            year: None,
            price: None,
            description: None,
            condition: ScooterCondition::default(),
            is_sold: false,
            sold_date: None,
            sold_to_customer_id: None,
            purchase_price: None,
            selling_price: None,
        }
    }

    /// Aplica la política de omisión: textos vacíos no se envían
    pub fn normalized(mut self) -> Self {
        self.plate = non_blank(self.plate);
        self.description = non_blank(self.description);
        self.brand = self.brand.trim().to_string();
        self.model = self.model.trim().to_string();
        self
    }

    /// Datos de venta esperados pero ausentes (sólo aviso, el backend decide)
    pub fn missing_sale_details(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.is_sold {
            if self.sold_date.is_none() {
                missing.push("sold_date");
            }
            if self.sold_to_customer_id.is_none() {
                missing.push("sold_to_customer_id");
            }
        }
        missing
    }
}

impl From<&Scooter> for ScooterPayload {
    fn from(scooter: &Scooter) -> Self {
        Self {
            plate: scooter.plate.clone(),
            brand: scooter.brand.clone(),
            model: scooter.model.clone(),
            year: scooter.year,
            price: scooter.price,
            description: scooter.description.clone(),
            condition: scooter.condition,
            is_sold: scooter.is_sold,
            sold_date: scooter.sold_date,
            sold_to_customer_id: scooter.sold_to_customer_id,
            purchase_price: scooter.purchase_price,
            selling_price: scooter.selling_price,
        }
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_wire_values() {
        let json = serde_json::to_string(&ScooterCondition::New).unwrap();
        assert_eq!(json, "\"Καινούργιο\"");
        let used: ScooterCondition = serde_json::from_str("\"Μεταχειρισμένο\"").unwrap();
        assert_eq!(used, ScooterCondition::Used);
    }

    #[test]
    fn test_payload_omits_absent_fields() {
        let mut payload = ScooterPayload::new("Piaggio", "Liberty 125");
        payload.plate = Some("  ".to_string());
        let json = serde_json::to_value(payload.normalized()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("plate"));
        assert!(!obj.contains_key("sold_date"));
        assert!(!obj.contains_key("selling_price"));
        assert_eq!(obj["is_sold"], false);
    }

    #[test]
    fn test_sold_scooter_without_details_is_flagged() {
        let mut payload = ScooterPayload::new("Vespa", "Primavera");
        payload.is_sold = true;
        assert_eq!(
            payload.missing_sale_details(),
            vec!["sold_date", "sold_to_customer_id"]
        );
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_display_name() {
        let scooter: Scooter = serde_json::from_value(serde_json::json!({
            "id": 3,
            "plate": "ΙΚΥ-1234",
            "brand": "Honda",
            "model": "SH 150",
            "year": 2021,
            "price": 2500.0,
            "condition": "Μεταχειρισμένο",
            "is_sold": false
        }))
        .unwrap();
        assert_eq!(scooter.display_name(), "Honda SH 150 (ΙΚΥ-1234) - 2021");
        assert!(scooter.is_available());
    }
}
