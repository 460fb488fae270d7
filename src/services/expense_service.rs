//! Gastos manuales y mantenimiento del libro
//!
//! Registro de gastos (`/transactions/expenses`), ingresos manuales y borrado
//! de asientos. Cada mutación avisa a la vista financiera.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{error, info};
use validator::Validate;

use crate::clients::TransactionOperations;
use crate::events::{ChangeOrigin, EventBus};
use crate::models::transaction::{
    ExpensePayload, Transaction, TransactionCategory, TransactionPayload, TransactionType,
};
use crate::utils::errors::{validation_error, AppResult};

/// Borrador del formulario de gastos
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub category: Option<TransactionCategory>,
    pub description: String,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
}

impl ExpenseDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            category: None,
            description: String::new(),
            amount: None,
            date: Some(today),
        }
    }

    /// Borrador para la siguiente entrada: conserva la categoría elegida
    pub fn next(&self, today: NaiveDate) -> Self {
        Self {
            category: self.category.clone(),
            ..Self::new(today)
        }
    }

    pub fn to_payload(&self) -> AppResult<ExpensePayload> {
        let category = self.category.clone().ok_or_else(|| {
            validation_error("category", "required", "Παρακαλώ επιλέξτε κατηγορία")
        })?;
        let amount = self.amount.ok_or_else(|| {
            validation_error("amount", "required", "Παρακαλώ εισάγετε έγκυρο ποσό")
        })?;
        let date = self.date.ok_or_else(|| {
            validation_error("date", "required", "Παρακαλώ επιλέξτε ημερομηνία")
        })?;

        let payload = ExpensePayload {
            category,
            description: self.description.trim().to_string(),
            amount,
            date,
        };
        payload.validate()?;
        Ok(payload)
    }
}

/// Servicio del libro de transacciones
#[derive(Clone)]
pub struct ExpenseService {
    transactions: Arc<dyn TransactionOperations>,
    events: EventBus,
}

impl ExpenseService {
    pub fn new(transactions: Arc<dyn TransactionOperations>, events: EventBus) -> Self {
        Self {
            transactions,
            events,
        }
    }

    pub async fn add_expense(&self, draft: &ExpenseDraft) -> AppResult<Transaction> {
        let payload = draft.to_payload()?;
        let transaction = self
            .transactions
            .create_expense(&payload)
            .await
            .map_err(|e| {
                error!("❌ Error registrando gasto: {}", e);
                e
            })?;

        info!("✅ Gasto {} registrado: {}", transaction.id, payload.description);
        self.events.publish(ChangeOrigin::Expense);
        Ok(transaction)
    }

    /// Ingreso manual (`POST /transactions` con `type=income`)
    pub async fn add_income(&self, payload: TransactionPayload) -> AppResult<Transaction> {
        let payload = TransactionPayload {
            kind: TransactionType::Income,
            description: payload.description.map(|d| d.trim().to_string()),
            ..payload
        };
        payload.validate()?;

        let transaction = self.transactions.create_income(&payload).await?;
        self.events.publish(ChangeOrigin::Income);
        Ok(transaction)
    }

    pub async fn update(&self, transaction_id: i64, payload: TransactionPayload) -> AppResult<Transaction> {
        payload.validate()?;
        let transaction = self.transactions.update(transaction_id, &payload).await?;
        self.events.publish(ChangeOrigin::TransactionUpdated);
        Ok(transaction)
    }

    pub async fn delete(&self, transaction_id: i64) -> AppResult<()> {
        self.transactions.delete(transaction_id).await.map_err(|e| {
            error!("❌ Error eliminando transacción {}: {}", transaction_id, e);
            e
        })?;
        self.events.publish(ChangeOrigin::TransactionDeleted);
        Ok(())
    }
}
