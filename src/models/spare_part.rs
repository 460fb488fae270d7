//! Modelo de SparePart
//!
//! Inventario de recambios, su payload de escritura y la petición de venta
//! (`POST /spare-parts/sell`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{non_blank, validate_non_negative_amount, validate_not_blank};

/// Umbral de reposición por defecto al dar de alta un recambio
pub const DEFAULT_MIN_STOCK: i32 = 5;

/// Categoría de recambio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SparePartCategory {
    #[serde(rename = "Ελαστικά")]
    Tyres,
    #[serde(rename = "Λάδια")]
    Oils,
    #[serde(rename = "Φίλτρα")]
    Filters,
    #[serde(rename = "Μπαταρίες")]
    Batteries,
    #[serde(rename = "Αναλώσιμα")]
    Consumables,
    #[serde(rename = "Άλλο")]
    Other,
}

impl SparePartCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SparePartCategory::Tyres => "Ελαστικά",
            SparePartCategory::Oils => "Λάδια",
            SparePartCategory::Filters => "Φίλτρα",
            SparePartCategory::Batteries => "Μπαταρίες",
            SparePartCategory::Consumables => "Αναλώσιμα",
            SparePartCategory::Other => "Άλλο",
        }
    }
}

/// SparePart principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparePart {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub category: Option<SparePartCategory>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub purchase_price: Option<Decimal>,
    #[serde(default)]
    pub selling_price: Option<Decimal>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default = "default_min_stock")]
    pub min_stock: i32,
}

fn default_min_stock() -> i32 {
    DEFAULT_MIN_STOCK
}

impl SparePart {
    /// Stock bajo: igual o por debajo del umbral de reposición
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Texto para selectores: `Φίλτρο λαδιού - FL-01 (Απόθεμα: 4)`
    pub fn display_name(&self) -> String {
        match self.code.as_deref().filter(|c| !c.is_empty()) {
            Some(code) => format!("{} - {} (Απόθεμα: {})", self.name, code, self.stock),
            None => format!("{} (Απόθεμα: {})", self.name, self.stock),
        }
    }
}

/// Request para crear o actualizar un recambio
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct SparePartPayload {
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<SparePartCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_non_negative_amount")]
    pub purchase_price: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_non_negative_amount")]
    pub selling_price: Option<Decimal>,

    #[validate(range(min = 0))]
    pub stock: i32,

    #[validate(range(min = 0))]
    pub min_stock: i32,
}

impl SparePartPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
            category: None,
            description: None,
            purchase_price: None,
            selling_price: None,
            stock: 0,
            min_stock: DEFAULT_MIN_STOCK,
        }
    }

    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.code = non_blank(self.code);
        self.description = non_blank(self.description);
        self
    }
}

impl From<&SparePart> for SparePartPayload {
    fn from(part: &SparePart) -> Self {
        Self {
            name: part.name.clone(),
            code: part.code.clone(),
            category: part.category,
            description: part.description.clone(),
            purchase_price: part.purchase_price,
            selling_price: part.selling_price,
            stock: part.stock,
            min_stock: part.min_stock,
        }
        .normalized()
    }
}

/// Petición de venta de recambio.
///
/// `sale_price` es el importe total de la línea, no el precio unitario.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct SellSparePartRequest {
    pub spare_part_id: i64,

    #[validate(range(min = 1))]
    pub quantity: i32,

    #[validate(custom = "validate_non_negative_amount")]
    pub sale_price: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn part(stock: i32, min_stock: i32) -> SparePart {
        SparePart {
            id: 1,
            name: "Φίλτρο λαδιού".to_string(),
            code: Some("FL-01".to_string()),
            category: Some(SparePartCategory::Filters),
            description: None,
            purchase_price: Some(Decimal::new(450, 2)),
            selling_price: Some(Decimal::new(999, 2)),
            stock,
            min_stock,
        }
    }

    #[test]
    fn test_low_stock_threshold_is_inclusive() {
        assert!(part(2, 2).is_low_stock());
        assert!(part(1, 2).is_low_stock());
        assert!(!part(3, 2).is_low_stock());
        assert!(!part(0, 2).is_in_stock());
    }

    #[test]
    fn test_missing_min_stock_uses_default() {
        let part: SparePart = serde_json::from_value(json!({
            "id": 4,
            "name": "Μπουζί",
            "stock": 3
        }))
        .unwrap();
        assert_eq!(part.min_stock, DEFAULT_MIN_STOCK);
        assert!(part.is_low_stock());
    }

    #[test]
    fn test_sell_request_omits_absent_optionals() {
        let request = SellSparePartRequest {
            spare_part_id: 1,
            quantity: 3,
            sale_price: Decimal::new(999, 2),
            customer_name: None,
            notes: None,
        };
        assert!(request.validate().is_ok());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({ "spare_part_id": 1, "quantity": 3, "sale_price": 9.99 })
        );
    }

    #[test]
    fn test_category_wire_values() {
        let json = serde_json::to_value(SparePartCategory::Batteries).unwrap();
        assert_eq!(json, "Μπαταρίες");
        assert_eq!(part(4, 2).display_name(), "Φίλτρο λαδιού - FL-01 (Απόθεμα: 4)");
    }
}
