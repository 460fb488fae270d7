//! Modelos financieros calculados
//!
//! Ninguno de estos structs se guarda: son el resultado de agregar el libro
//! de transacciones, ya sea localmente o en `/financial/*`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::transaction::{Transaction, TransactionCategory};

/// Total por categoría
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: TransactionCategory,
    pub total: Decimal,
}

impl CategoryTotal {
    pub fn label(&self) -> &str {
        self.category.label()
    }
}

/// Resumen financiero de un rango
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub profit: Decimal,
    #[serde(default)]
    pub income_by_category: Vec<CategoryTotal>,
    #[serde(default)]
    pub expenses_by_category: Vec<CategoryTotal>,
}

impl FinancialSummary {
    /// Ganancia o pérdida, para la etiqueta de la tarjeta
    pub fn is_profitable(&self) -> bool {
        self.profit >= Decimal::ZERO
    }

    pub fn profit_label(&self) -> &'static str {
        if self.is_profitable() {
            "Κέρδος"
        } else {
            "Ζημιά"
        }
    }
}

/// Fila de la serie mensual.
///
/// `month` es `YYYY-MM`, por lo que el orden lexicográfico es cronológico.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAnalysis {
    pub month: String,
    #[serde(default)]
    pub month_name: String,
    pub income: Decimal,
    pub expenses: Decimal,
}

impl MonthlyAnalysis {
    pub fn profit(&self) -> Decimal {
        self.income - self.expenses
    }
}

/// Análisis de ingresos o gastos por categoría (`/financial/income/`, `/financial/expenses/`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub by_category: Vec<CategoryTotal>,
}

/// Datos completos de la página financiera
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FinancialSnapshot {
    pub summary: FinancialSummary,
    /// Siempre en orden cronológico
    pub monthly: Vec<MonthlyAnalysis>,
    pub recent_transactions: Vec<Transaction>,
}

impl FinancialSnapshot {
    /// Rango sin datos: válido, distinto de un fallo de carga
    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty() && self.recent_transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_summary_shape() {
        let summary: FinancialSummary = serde_json::from_value(json!({
            "total_income": 1500.5,
            "total_expenses": 1700.0,
            "profit": -199.5,
            "income_by_category": [{ "category": "parts_sale", "total": 1500.5 }],
            "expenses_by_category": [{ "category": "rent", "total": 1700.0 }]
        }))
        .unwrap();
        assert!(!summary.is_profitable());
        assert_eq!(summary.profit_label(), "Ζημιά");
        assert_eq!(summary.income_by_category[0].label(), "Πώληση Ανταλλακτικών");
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = FinancialSummary::default();
        assert_eq!(summary.profit, Decimal::ZERO);
        assert!(summary.is_profitable());
    }
}
