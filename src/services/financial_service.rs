//! Servicio de agregación financiera
//!
//! Reducción pura del libro de transacciones a resumen, desglose por
//! categoría y serie mensual, más la carga de la página financiera desde los
//! endpoints `/financial/*`. Nunca modifica el libro.
//!
//! Orden de la serie mensual: la agregación local devuelve filas en orden
//! cronológico (más antigua primero). El backend devuelve `/financial/monthly/`
//! con la más reciente primero; [`into_chronological`] normaliza ese orden.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Datelike;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::clients::{FinancialOperations, TransactionOperations};
use crate::models::financial::{
    CategoryAnalysis, CategoryTotal, FinancialSnapshot, FinancialSummary, MonthlyAnalysis,
};
use crate::models::transaction::{Transaction, TransactionCategory, TransactionFilter, TransactionType};
use crate::utils::dates::{month_label, month_start, DateRange};
use crate::utils::errors::{validation_error, AppError, AppResult};

/// Tope de páginas al recorrer el libro completo
const MAX_LEDGER_PAGES: u32 = 10_000;

fn in_range(transaction: &Transaction, range: Option<DateRange>) -> bool {
    range.map_or(true, |r| r.contains(transaction.date))
}

fn category_rows(totals: BTreeMap<TransactionCategory, Decimal>) -> Vec<CategoryTotal> {
    totals
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect()
}

/// Resumir las transacciones dentro del rango (ambos extremos incluidos).
///
/// Las categorías sin transacciones no aparecen en el desglose.
pub fn summarize(transactions: &[Transaction], range: Option<DateRange>) -> FinancialSummary {
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut income_by_category: BTreeMap<TransactionCategory, Decimal> = BTreeMap::new();
    let mut expenses_by_category: BTreeMap<TransactionCategory, Decimal> = BTreeMap::new();

    for tx in transactions.iter().filter(|tx| in_range(tx, range)) {
        match tx.kind {
            TransactionType::Income => {
                total_income += tx.amount;
                *income_by_category.entry(tx.category.clone()).or_default() += tx.amount;
            }
            TransactionType::Expense => {
                total_expenses += tx.amount;
                *expenses_by_category.entry(tx.category.clone()).or_default() += tx.amount;
            }
        }
    }

    FinancialSummary {
        total_income,
        total_expenses,
        profit: total_income - total_expenses,
        income_by_category: category_rows(income_by_category),
        expenses_by_category: category_rows(expenses_by_category),
    }
}

/// Serie mensual en orden cronológico, sólo con los meses que tienen transacciones
pub fn monthly_analysis(transactions: &[Transaction], range: Option<DateRange>) -> Vec<MonthlyAnalysis> {
    let mut months: BTreeMap<chrono::NaiveDate, (Decimal, Decimal)> = BTreeMap::new();

    for tx in transactions.iter().filter(|tx| in_range(tx, range)) {
        let bucket = months.entry(month_start(tx.date)).or_default();
        match tx.kind {
            TransactionType::Income => bucket.0 += tx.amount,
            TransactionType::Expense => bucket.1 += tx.amount,
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyAnalysis {
            month: format!("{:04}-{:02}", month.year(), month.month()),
            month_name: month_label(month),
            income,
            expenses,
        })
        .collect()
}

/// Ordenar filas mensuales cronológicamente (orden estable)
pub fn into_chronological(mut rows: Vec<MonthlyAnalysis>) -> Vec<MonthlyAnalysis> {
    rows.sort_by(|a, b| a.month.cmp(&b.month));
    rows
}

/// Envuelve un fallo de carga para distinguirlo de un rango sin datos
fn unavailable(err: AppError) -> AppError {
    match err {
        AppError::AggregationUnavailable(_) => err,
        other => {
            error!("❌ Agregación financiera no disponible: {}", other);
            AppError::AggregationUnavailable(Box::new(other))
        }
    }
}

fn check_range(range: DateRange) -> AppResult<()> {
    if range.is_valid() {
        Ok(())
    } else {
        Err(validation_error(
            "end_date",
            "date_order",
            "Η ημερομηνία λήξης πρέπει να είναι μετά την ημερομηνία έναρξης.",
        ))
    }
}

/// Resultado de la agregación local
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FinancialAggregate {
    pub summary: FinancialSummary,
    pub monthly: Vec<MonthlyAnalysis>,
}

/// Servicio de agregación financiera
#[derive(Clone)]
pub struct FinancialService {
    transactions: Arc<dyn TransactionOperations>,
    financial: Arc<dyn FinancialOperations>,
    page_size: u32,
    recent_limit: u32,
}

impl FinancialService {
    pub fn new(
        transactions: Arc<dyn TransactionOperations>,
        financial: Arc<dyn FinancialOperations>,
        page_size: u32,
        recent_limit: u32,
    ) -> Self {
        Self {
            transactions,
            financial,
            page_size: page_size.max(1),
            recent_limit,
        }
    }

    /// Recorrer el libro del rango página a página
    pub async fn fetch_ledger(&self, range: DateRange) -> AppResult<Vec<Transaction>> {
        let mut filter = TransactionFilter::between(range.start, range.end).with_limit(self.page_size);
        let mut ledger = Vec::new();

        for _ in 0..MAX_LEDGER_PAGES {
            let page = self.transactions.list(&filter).await?;
            let last_page = (page.len() as u32) < self.page_size;
            ledger.extend(page);
            if last_page {
                return Ok(ledger);
            }
            filter = filter.next_page();
        }

        warn!("⚠️ Libro truncado tras {} páginas", MAX_LEDGER_PAGES);
        Ok(ledger)
    }

    /// Agregar localmente el libro del rango
    pub async fn aggregate(&self, range: DateRange) -> AppResult<FinancialAggregate> {
        check_range(range)?;
        let ledger = self.fetch_ledger(range).await.map_err(unavailable)?;

        let aggregate = FinancialAggregate {
            summary: summarize(&ledger, Some(range)),
            monthly: monthly_analysis(&ledger, Some(range)),
        };
        info!(
            "📊 {} transacciones agregadas ({} → {}), {} meses",
            ledger.len(),
            range.start,
            range.end,
            aggregate.monthly.len()
        );
        Ok(aggregate)
    }

    pub async fn summary(&self, range: DateRange) -> AppResult<FinancialSummary> {
        Ok(self.aggregate(range).await?.summary)
    }

    pub async fn monthly(&self, range: DateRange) -> AppResult<Vec<MonthlyAnalysis>> {
        Ok(self.aggregate(range).await?.monthly)
    }

    /// Datos de la página financiera desde el backend: resumen, serie
    /// mensual (ya cronológica) y las últimas transacciones del rango.
    pub async fn load_page(&self, range: DateRange) -> AppResult<FinancialSnapshot> {
        check_range(range)?;
        let recent = TransactionFilter::between(range.start, range.end).with_limit(self.recent_limit);

        let (summary, monthly, recent_transactions) = futures::try_join!(
            self.financial.summary(Some(range)),
            self.financial.monthly(Some(range)),
            self.transactions.list(&recent),
        )
        .map_err(unavailable)?;

        Ok(FinancialSnapshot {
            summary,
            monthly: into_chronological(monthly),
            recent_transactions,
        })
    }

    pub async fn income_analysis(&self, range: Option<DateRange>) -> AppResult<CategoryAnalysis> {
        self.financial.income(range).await.map_err(unavailable)
    }

    pub async fn expense_analysis(&self, range: Option<DateRange>) -> AppResult<CategoryAnalysis> {
        self.financial.expenses(range).await.map_err(unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::FakeBackend;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(
        id: i64,
        kind: TransactionType,
        category: TransactionCategory,
        cents: i64,
        on: NaiveDate,
    ) -> Transaction {
        Transaction {
            id,
            kind,
            category,
            description: None,
            amount: Decimal::new(cents, 2),
            date: on,
        }
    }

    fn ledger() -> Vec<Transaction> {
        use TransactionCategory::*;
        use TransactionType::*;
        vec![
            tx(1, Income, PartsSale, 999, date(2024, 1, 10)),
            tx(2, Income, Service, 4550, date(2024, 1, 20)),
            tx(3, Expense, Rent, 80000, date(2024, 2, 1)),
            tx(4, Income, PartsSale, 2001, date(2024, 2, 14)),
            tx(5, Expense, Salary, 120000, date(2024, 3, 31)),
            tx(6, Income, OtherIncome, 10000, date(2024, 3, 5)),
            tx(7, Income, ScooterSale, 250000, date(2024, 4, 1)),
        ]
    }

    fn q1() -> DateRange {
        DateRange::new(date(2024, 1, 1), date(2024, 3, 31))
    }

    #[test]
    fn test_empty_ledger_summary_is_zero() {
        let summary = summarize(&[], None);
        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.total_expenses, Decimal::ZERO);
        assert_eq!(summary.profit, Decimal::ZERO);
        assert!(summary.income_by_category.is_empty());
        assert!(monthly_analysis(&[], None).is_empty());
    }

    #[test]
    fn test_profit_and_category_sums_match_totals() {
        let summary = summarize(&ledger(), Some(q1()));
        assert_eq!(summary.total_income, Decimal::new(17550, 2));
        assert_eq!(summary.total_expenses, Decimal::new(200000, 2));
        assert_eq!(summary.profit, summary.total_income - summary.total_expenses);
        assert!(summary.profit < Decimal::ZERO);

        let income_sum: Decimal = summary.income_by_category.iter().map(|c| c.total).sum();
        let expense_sum: Decimal = summary.expenses_by_category.iter().map(|c| c.total).sum();
        assert_eq!(income_sum, summary.total_income);
        assert_eq!(expense_sum, summary.total_expenses);
    }

    #[test]
    fn test_breakdown_omits_absent_categories() {
        let summary = summarize(&ledger(), Some(q1()));
        let income: Vec<_> = summary.income_by_category.iter().map(|c| c.category.clone()).collect();
        assert_eq!(
            income,
            vec![
                TransactionCategory::PartsSale,
                TransactionCategory::Service,
                TransactionCategory::OtherIncome
            ]
        );
        assert_eq!(summary.income_by_category[0].total, Decimal::new(3000, 2));
        assert!(!income.contains(&TransactionCategory::ScooterSale));
    }

    #[test]
    fn test_unknown_categories_get_their_own_rows() {
        let rows: Vec<Transaction> = serde_json::from_value(serde_json::json!([
            {"id": 1, "type": "income", "category": "rental", "amount": 50.0, "date": "2024-02-01"},
            {"id": 2, "type": "income", "category": "deposit", "amount": 20.0, "date": "2024-02-02"},
            {"id": 3, "type": "income", "category": "rental", "amount": 30.0, "date": "2024-02-03"}
        ]))
        .unwrap();

        let summary = summarize(&rows, None);
        let income: Vec<_> = summary
            .income_by_category
            .iter()
            .map(|row| (row.label().to_string(), row.total))
            .collect();
        assert_eq!(
            income,
            vec![
                ("deposit".to_string(), Decimal::new(20, 0)),
                ("rental".to_string(), Decimal::new(80, 0)),
            ]
        );
        assert_eq!(summary.total_income, Decimal::new(100, 0));
    }

    #[test]
    fn test_three_month_range_gives_three_rows() {
        let rows = monthly_analysis(&ledger(), Some(q1()));
        let months: Vec<_> = rows.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(rows[0].income, Decimal::new(5549, 2));
        assert_eq!(rows[0].expenses, Decimal::ZERO);
        assert_eq!(rows[1].month_name, "Φεβ 2024");
    }

    #[test]
    fn test_months_without_transactions_are_skipped() {
        let sparse: Vec<_> = ledger().into_iter().filter(|t| t.date.month() != 2).collect();
        let rows = monthly_analysis(&sparse, Some(q1()));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_backend_rows_are_normalized() {
        let mut rows = monthly_analysis(&ledger(), None);
        rows.reverse();
        let rows = into_chronological(rows);
        assert_eq!(rows.first().unwrap().month, "2024-01");
        assert_eq!(rows.last().unwrap().month, "2024-04");
    }

    #[tokio::test]
    async fn test_aggregate_pages_through_ledger() {
        let backend = FakeBackend::with_transactions(ledger());
        let service = FinancialService::new(backend.clone(), backend.clone(), 2, 10);

        let aggregate = service.aggregate(q1()).await.unwrap();
        assert_eq!(aggregate.monthly.len(), 3);
        assert_eq!(aggregate.summary.total_income, Decimal::new(17550, 2));
        assert!(backend.transaction_list_calls() >= 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_distinguishable_from_empty() {
        let backend = FakeBackend::with_transactions(Vec::new());
        let service = FinancialService::new(backend.clone(), backend.clone(), 100, 10);
        let empty = service.aggregate(q1()).await.unwrap();
        assert_eq!(empty.summary, FinancialSummary::default());

        backend.fail_next_requests(true);
        let err = service.aggregate(q1()).await.unwrap_err();
        assert!(matches!(err, AppError::AggregationUnavailable(_)));
        let err = service.load_page(q1()).await.unwrap_err();
        assert!(matches!(err, AppError::AggregationUnavailable(_)));
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected_locally() {
        let backend = FakeBackend::with_transactions(ledger());
        let service = FinancialService::new(backend.clone(), backend.clone(), 100, 10);
        let err = service
            .aggregate(DateRange::new(date(2024, 3, 1), date(2024, 1, 1)))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(backend.transaction_list_calls(), 0);
    }

    #[tokio::test]
    async fn test_load_page_returns_chronological_monthly_rows() {
        let backend = FakeBackend::with_transactions(ledger());
        let service = FinancialService::new(backend.clone(), backend.clone(), 100, 2);
        let snapshot = service.load_page(q1()).await.unwrap();

        let months: Vec<_> = snapshot.monthly.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(snapshot.recent_transactions.len(), 2);
        assert_eq!(snapshot.summary.total_expenses, Decimal::new(200000, 2));
    }
}
