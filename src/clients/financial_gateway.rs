//! Gateway de análisis financiero del backend (`/financial/*`)
//!
//! Todos los endpoints aceptan `start_date` y `end_date` opcionales.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clients::api_client::ApiClient;
use crate::models::financial::{CategoryAnalysis, CategoryTotal, FinancialSummary, MonthlyAnalysis};
use crate::utils::dates::DateRange;
use crate::utils::errors::AppResult;

const FINANCIAL_URL: &str = "/financial";

#[derive(Debug, Clone, Copy, Default, Serialize)]
struct RangeQuery {
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::dates::flexible_date_option"
    )]
    start_date: Option<NaiveDate>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::dates::flexible_date_option"
    )]
    end_date: Option<NaiveDate>,
}

impl From<Option<DateRange>> for RangeQuery {
    fn from(range: Option<DateRange>) -> Self {
        Self {
            start_date: range.map(|r| r.start),
            end_date: range.map(|r| r.end),
        }
    }
}

/// El análisis por categoría llega como objeto o como lista de filas
#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryAnalysisWire {
    Rows(Vec<CategoryTotal>),
    Detailed(CategoryAnalysis),
}

impl From<CategoryAnalysisWire> for CategoryAnalysis {
    fn from(wire: CategoryAnalysisWire) -> Self {
        match wire {
            CategoryAnalysisWire::Rows(rows) => CategoryAnalysis {
                total: rows.iter().map(|row| row.total).sum(),
                by_category: rows,
            },
            CategoryAnalysisWire::Detailed(analysis) => analysis,
        }
    }
}

/// Operaciones de análisis financiero del backend
#[async_trait::async_trait]
pub trait FinancialOperations: Send + Sync {
    async fn summary(&self, range: Option<DateRange>) -> AppResult<FinancialSummary>;
    async fn income(&self, range: Option<DateRange>) -> AppResult<CategoryAnalysis>;
    async fn expenses(&self, range: Option<DateRange>) -> AppResult<CategoryAnalysis>;
    /// Serie mensual tal como la ordena el backend (más reciente primero)
    async fn monthly(&self, range: Option<DateRange>) -> AppResult<Vec<MonthlyAnalysis>>;
}

/// Gateway HTTP de análisis financiero
#[derive(Clone)]
pub struct FinancialGateway {
    api: ApiClient,
}

impl FinancialGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn fetch_category(&self, kind: &str, range: Option<DateRange>) -> AppResult<CategoryAnalysis> {
        let wire: CategoryAnalysisWire = self
            .api
            .get_with_query(&format!("{}/{}/", FINANCIAL_URL, kind), &RangeQuery::from(range))
            .await?;
        Ok(wire.into())
    }
}

#[async_trait::async_trait]
impl FinancialOperations for FinancialGateway {
    async fn summary(&self, range: Option<DateRange>) -> AppResult<FinancialSummary> {
        self.api
            .get_with_query(&format!("{}/summary/", FINANCIAL_URL), &RangeQuery::from(range))
            .await
    }

    async fn income(&self, range: Option<DateRange>) -> AppResult<CategoryAnalysis> {
        self.fetch_category("income", range).await
    }

    async fn expenses(&self, range: Option<DateRange>) -> AppResult<CategoryAnalysis> {
        self.fetch_category("expenses", range).await
    }

    async fn monthly(&self, range: Option<DateRange>) -> AppResult<Vec<MonthlyAnalysis>> {
        self.api
            .get_with_query(&format!("{}/monthly/", FINANCIAL_URL), &RangeQuery::from(range))
            .await
    }
}
