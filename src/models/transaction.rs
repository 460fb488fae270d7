//! Modelo de Transaction
//!
//! Asientos del libro de ingresos/gastos. Los crea el backend como efecto de
//! alquileres, servicios con coste y ventas de recambios, o el operador al
//! registrar un gasto manual.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validation::{validate_not_blank, validate_positive_amount};

/// Tipo de asiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// Categoría de asiento; cada tipo tiene su propio vocabulario.
///
/// Valores del backend fuera del vocabulario se conservan tal cual en
/// `Other`, de modo que el listado, el desglose y el reenvío del asiento los
/// mantienen intactos.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionCategory {
    // Ingresos
    PartsSale,
    Service,
    ScooterSale,
    OtherIncome,
    // Gastos
    Salary,
    Rent,
    OperationalExpenses,
    SparePartsPurchase,
    EquipmentMaintenance,
    OtherExpenses,
    Other(String),
}

impl TransactionCategory {
    pub const INCOME: [TransactionCategory; 4] = [
        TransactionCategory::PartsSale,
        TransactionCategory::Service,
        TransactionCategory::ScooterSale,
        TransactionCategory::OtherIncome,
    ];

    pub const EXPENSE: [TransactionCategory; 6] = [
        TransactionCategory::Salary,
        TransactionCategory::Rent,
        TransactionCategory::OperationalExpenses,
        TransactionCategory::SparePartsPurchase,
        TransactionCategory::EquipmentMaintenance,
        TransactionCategory::OtherExpenses,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TransactionCategory::PartsSale => "parts_sale",
            TransactionCategory::Service => "service",
            TransactionCategory::ScooterSale => "scooter_sale",
            TransactionCategory::OtherIncome => "other_income",
            TransactionCategory::Salary => "salary",
            TransactionCategory::Rent => "rent",
            TransactionCategory::OperationalExpenses => "operational_expenses",
            TransactionCategory::SparePartsPurchase => "spare_parts_purchase",
            TransactionCategory::EquipmentMaintenance => "equipment_maintenance",
            TransactionCategory::OtherExpenses => "other_expenses",
            TransactionCategory::Other(raw) => raw,
        }
    }

    /// Etiqueta en griego; las categorías desconocidas muestran su valor crudo
    pub fn label(&self) -> &str {
        match self {
            TransactionCategory::PartsSale => "Πώληση Ανταλλακτικών",
            TransactionCategory::Service => "Υπηρεσίες Επισκευής",
            TransactionCategory::ScooterSale => "Πώληση Σκούτερ",
            TransactionCategory::OtherIncome => "Λοιπά Έσοδα",
            TransactionCategory::Salary => "Μισθοδοσία",
            TransactionCategory::Rent => "Ενοίκιο",
            TransactionCategory::OperationalExpenses => "Λειτουργικά Έξοδα",
            TransactionCategory::SparePartsPurchase => "Αγορά Ανταλλακτικών",
            TransactionCategory::EquipmentMaintenance => "Συντήρηση Εξοπλισμού",
            TransactionCategory::OtherExpenses => "Λοιπά Έξοδα",
            TransactionCategory::Other(raw) => raw,
        }
    }

    pub fn is_income(&self) -> bool {
        Self::INCOME.contains(self)
    }

    pub fn is_expense(&self) -> bool {
        Self::EXPENSE.contains(self)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TransactionCategory::Other(_))
    }

    /// La categoría pertenece al vocabulario del tipo dado
    pub fn belongs_to(&self, kind: TransactionType) -> bool {
        match kind {
            TransactionType::Income => self.is_income(),
            TransactionType::Expense => self.is_expense(),
        }
    }
}

impl From<String> for TransactionCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "parts_sale" => TransactionCategory::PartsSale,
            "service" => TransactionCategory::Service,
            "scooter_sale" => TransactionCategory::ScooterSale,
            "other_income" => TransactionCategory::OtherIncome,
            "salary" => TransactionCategory::Salary,
            "rent" => TransactionCategory::Rent,
            "operational_expenses" => TransactionCategory::OperationalExpenses,
            "spare_parts_purchase" => TransactionCategory::SparePartsPurchase,
            "equipment_maintenance" => TransactionCategory::EquipmentMaintenance,
            "other_expenses" => TransactionCategory::OtherExpenses,
            _ => TransactionCategory::Other(value),
        }
    }
}

impl From<TransactionCategory> for String {
    fn from(category: TransactionCategory) -> Self {
        match category {
            TransactionCategory::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Transaction principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: TransactionCategory,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: Decimal,
    #[serde(with = "crate::utils::dates::flexible_date")]
    pub date: NaiveDate,
}

/// Request para crear o actualizar un asiento (`POST /transactions`, `PUT /transactions/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[validate(schema(function = "validate_category_vocabulary"))]
pub struct TransactionPayload {
    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub category: TransactionCategory,

    /// Ausente se omite del cuerpo; presente no puede estar en blanco
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_blank")]
    pub description: Option<String>,

    #[validate(custom = "validate_positive_amount")]
    pub amount: Decimal,

    #[serde(with = "crate::utils::dates::flexible_date")]
    pub date: NaiveDate,
}

/// Una categoría conocida debe ser del vocabulario del tipo; las desconocidas
/// vienen del backend y se reenvían sin tocar.
fn validate_category_vocabulary(payload: &TransactionPayload) -> Result<(), ValidationError> {
    if payload.category.is_known() && !payload.category.belongs_to(payload.kind) {
        let mut error = ValidationError::new("category");
        error.add_param("type".into(), &payload.kind.as_str());
        error.add_param("category".into(), &payload.category.as_str());
        error.message = Some("Η κατηγορία δεν αντιστοιχεί στον τύπο συναλλαγής".into());
        return Err(error);
    }
    Ok(())
}

impl From<&Transaction> for TransactionPayload {
    fn from(transaction: &Transaction) -> Self {
        Self {
            kind: transaction.kind,
            category: transaction.category.clone(),
            description: transaction.description.clone(),
            amount: transaction.amount,
            date: transaction.date,
        }
    }
}

/// Request para registrar un gasto manual (`POST /transactions/expenses`)
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct ExpensePayload {
    #[validate(custom = "validate_expense_category")]
    pub category: TransactionCategory,

    #[validate(custom = "validate_not_blank")]
    pub description: String,

    #[validate(custom = "validate_positive_amount")]
    pub amount: Decimal,

    #[serde(with = "crate::utils::dates::flexible_date")]
    pub date: NaiveDate,
}

fn validate_expense_category(category: &TransactionCategory) -> Result<(), ValidationError> {
    if !category.is_expense() {
        let mut error = ValidationError::new("expense_category");
        error.add_param("category".into(), &category.as_str());
        error.message = Some("Παρακαλώ επιλέξτε κατηγορία εξόδου".into());
        return Err(error);
    }
    Ok(())
}

/// Filtros del listado `GET /transactions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionFilter {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TransactionCategory>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::dates::flexible_date_option"
    )]
    pub start_date: Option<NaiveDate>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::dates::flexible_date_option"
    )]
    pub end_date: Option<NaiveDate>,

    pub skip: u32,

    pub limit: u32,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            kind: None,
            category: None,
            start_date: None,
            end_date: None,
            skip: 0,
            limit: 100,
        }
    }
}

impl TransactionFilter {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Página siguiente con el mismo tamaño
    pub fn next_page(&self) -> Self {
        Self {
            skip: self.skip + self.limit,
            ..self.clone()
        }
    }
}
