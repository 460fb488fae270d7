//! Gateway del libro de transacciones (`/transactions`)

use crate::clients::api_client::ApiClient;
use crate::models::transaction::{
    ExpensePayload, Transaction, TransactionFilter, TransactionPayload, TransactionType,
};
use crate::utils::errors::AppResult;

const TRANSACTIONS_URL: &str = "/transactions";
const EXPENSES_URL: &str = "/transactions/expenses";

/// Operaciones sobre el libro de transacciones
#[async_trait::async_trait]
pub trait TransactionOperations: Send + Sync {
    async fn list(&self, filter: &TransactionFilter) -> AppResult<Vec<Transaction>>;
    /// Alta de ingreso; el tipo se fuerza a `income`
    async fn create_income(&self, payload: &TransactionPayload) -> AppResult<Transaction>;
    async fn create_expense(&self, payload: &ExpensePayload) -> AppResult<Transaction>;
    async fn update(&self, id: i64, payload: &TransactionPayload) -> AppResult<Transaction>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Gateway HTTP de transacciones
#[derive(Clone)]
pub struct TransactionGateway {
    api: ApiClient,
}

impl TransactionGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl TransactionOperations for TransactionGateway {
    async fn list(&self, filter: &TransactionFilter) -> AppResult<Vec<Transaction>> {
        self.api.get_with_query(TRANSACTIONS_URL, filter).await
    }

    async fn create_income(&self, payload: &TransactionPayload) -> AppResult<Transaction> {
        let payload = TransactionPayload {
            kind: TransactionType::Income,
            ..payload.clone()
        };
        log::info!(
            "💰 Nuevo ingreso {}: {}",
            payload.category.as_str(),
            payload.amount
        );
        self.api.post(TRANSACTIONS_URL, &payload).await
    }

    async fn create_expense(&self, payload: &ExpensePayload) -> AppResult<Transaction> {
        log::info!(
            "💸 Nuevo gasto {}: {}",
            payload.category.as_str(),
            payload.amount
        );
        self.api.post(EXPENSES_URL, payload).await
    }

    async fn update(&self, id: i64, payload: &TransactionPayload) -> AppResult<Transaction> {
        self.api
            .put(&format!("{}/{}", TRANSACTIONS_URL, id), payload)
            .await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        log::info!("🗑️ Eliminando transacción {}", id);
        self.api
            .delete(&format!("{}/{}", TRANSACTIONS_URL, id))
            .await
    }
}
