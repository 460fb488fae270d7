//! Backend en memoria para los tests de servicios
//!
//! Implementa todos los traits `*Operations` sobre un único estado compartido,
//! imitando los efectos del backend real (venta que descuenta stock y registra
//! el ingreso, servicios con coste que generan transacción).

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Local;
use rust_decimal::Decimal;
use serde_json::json;

use crate::clients::{
    CustomerOperations, FinancialOperations, RentalOperations, ScooterListFilter, ScooterOperations,
    ServiceOperations, SparePartOperations, TransactionOperations,
};
use crate::models::customer::{Customer, CustomerPayload};
use crate::models::financial::{CategoryAnalysis, FinancialSummary, MonthlyAnalysis};
use crate::models::rental::{Rental, RentalPayload};
use crate::models::scooter::{Scooter, ScooterPayload};
use crate::models::service::{Service, ServicePayload};
use crate::models::spare_part::{SellSparePartRequest, SparePart, SparePartPayload};
use crate::models::transaction::{
    ExpensePayload, Transaction, TransactionCategory, TransactionFilter, TransactionPayload,
    TransactionType,
};
use crate::services::financial_service::{monthly_analysis, summarize};
use crate::utils::dates::DateRange;
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};

#[derive(Default)]
struct FakeState {
    customers: Vec<Customer>,
    scooters: Vec<Scooter>,
    rentals: Vec<Rental>,
    services: Vec<Service>,
    spare_parts: Vec<SparePart>,
    transactions: Vec<Transaction>,
    sell_requests: Vec<SellSparePartRequest>,
    next_id: i64,
    failing: bool,
    latency: Option<Duration>,
    transaction_list_calls: usize,
    summary_calls: usize,
}

impl FakeState {
    fn allocate_id(&mut self) -> i64 {
        let used = self
            .transactions
            .iter()
            .map(|t| t.id)
            .chain(self.rentals.iter().map(|r| r.id))
            .chain(self.services.iter().map(|s| s.id))
            .chain(self.spare_parts.iter().map(|p| p.id))
            .chain(self.scooters.iter().map(|s| s.id))
            .chain(self.customers.iter().map(|c| c.id))
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(used) + 1;
        self.next_id
    }

    fn record_income(&mut self, category: TransactionCategory, amount: Decimal, description: String) {
        let id = self.allocate_id();
        self.transactions.push(Transaction {
            id,
            kind: TransactionType::Income,
            category,
            description: Some(description),
            amount,
            date: Local::now().date_naive(),
        });
    }
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn default_shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Arc<Self> {
        let backend = Self::default_shared();
        backend.lock().transactions = transactions;
        backend
    }

    pub fn with_spare_parts(parts: Vec<SparePart>) -> Arc<Self> {
        let backend = Self::default_shared();
        backend.lock().spare_parts = parts;
        backend
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Las siguientes peticiones fallan con error de red mientras esté activo
    pub fn fail_next_requests(&self, failing: bool) {
        self.lock().failing = failing;
    }

    pub fn set_latency(&self, latency: Duration) {
        self.lock().latency = Some(latency);
    }

    pub fn push_transaction(&self, transaction: Transaction) {
        self.lock().transactions.push(transaction);
    }

    pub fn push_scooter(&self, scooter: Scooter) {
        self.lock().scooters.push(scooter);
    }

    pub fn push_rental(&self, rental: Rental) {
        self.lock().rentals.push(rental);
    }

    pub fn push_customer(&self, customer: Customer) {
        self.lock().customers.push(customer);
    }

    pub fn transaction_list_calls(&self) -> usize {
        self.lock().transaction_list_calls
    }

    pub fn summary_calls(&self) -> usize {
        self.lock().summary_calls
    }

    pub fn sell_requests(&self) -> Vec<SellSparePartRequest> {
        self.lock().sell_requests.clone()
    }

    /// Listado filtrado como `GET /transactions`: fecha descendente, `skip`/`limit`
    pub fn list_transactions(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        let mut rows: Vec<Transaction> = self
            .lock()
            .transactions
            .iter()
            .filter(|t| filter.kind.map_or(true, |kind| t.kind == kind))
            .filter(|t| filter.category.as_ref().map_or(true, |category| &t.category == category))
            .filter(|t| filter.start_date.map_or(true, |start| t.date >= start))
            .filter(|t| filter.end_date.map_or(true, |end| t.date <= end))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        rows.into_iter()
            .skip(filter.skip as usize)
            .take(filter.limit as usize)
            .collect()
    }

    async fn begin(&self) -> AppResult<()> {
        let latency = self.lock().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if self.lock().failing {
            return Err(AppError::Network("connection refused".to_string()));
        }
        Ok(())
    }

    fn category_analysis(&self, range: Option<DateRange>, kind: TransactionType) -> CategoryAnalysis {
        let summary = summarize(&self.lock().transactions, range);
        match kind {
            TransactionType::Income => CategoryAnalysis {
                total: summary.total_income,
                by_category: summary.income_by_category,
            },
            TransactionType::Expense => CategoryAnalysis {
                total: summary.total_expenses,
                by_category: summary.expenses_by_category,
            },
        }
    }
}

fn scooter_from(id: i64, payload: &ScooterPayload) -> Scooter {
    Scooter {
        id,
        plate: payload.plate.clone(),
        brand: payload.brand.clone(),
        model: payload.model.clone(),
        year: payload.year,
        price: payload.price,
        description: payload.description.clone(),
        condition: payload.condition,
        is_sold: payload.is_sold,
        sold_date: payload.sold_date,
        sold_to_customer_id: payload.sold_to_customer_id,
        purchase_price: payload.purchase_price,
        selling_price: payload.selling_price,
    }
}

fn rental_from(id: i64, payload: &RentalPayload) -> Rental {
    Rental {
        id,
        scooter_id: payload.scooter_id,
        customer_id: payload.customer_id,
        start_date: payload.start_date,
        end_date: payload.end_date,
        total_price: Some(payload.total_price),
        status: payload.status,
        notes: payload.notes.clone(),
    }
}

fn service_from(id: i64, payload: &ServicePayload) -> Service {
    Service {
        id,
        scooter_info: payload.scooter_info.clone(),
        service_type: payload.service_type,
        description: payload.description.clone(),
        date: payload.date,
        cost: payload.cost,
        status: payload.status,
    }
}

fn spare_part_from(id: i64, payload: &SparePartPayload) -> SparePart {
    SparePart {
        id,
        name: payload.name.clone(),
        code: payload.code.clone(),
        category: payload.category,
        description: payload.description.clone(),
        purchase_price: payload.purchase_price,
        selling_price: payload.selling_price,
        stock: payload.stock,
        min_stock: payload.min_stock,
    }
}

fn transaction_from(id: i64, payload: &TransactionPayload) -> Transaction {
    Transaction {
        id,
        kind: payload.kind,
        category: payload.category.clone(),
        description: payload.description.clone(),
        amount: payload.amount,
        date: payload.date,
    }
}

fn replace<T>(rows: &mut [T], matches: impl Fn(&T) -> bool, value: T, resource: &str, id: i64) -> AppResult<()> {
    let slot = rows
        .iter_mut()
        .find(|row| matches(&**row))
        .ok_or_else(|| not_found_error(resource, &id.to_string()))?;
    *slot = value;
    Ok(())
}

fn remove<T>(rows: &mut Vec<T>, matches: impl Fn(&T) -> bool, resource: &str, id: i64) -> AppResult<()> {
    let before = rows.len();
    rows.retain(|row| !matches(row));
    if rows.len() == before {
        return Err(not_found_error(resource, &id.to_string()));
    }
    Ok(())
}

#[async_trait::async_trait]
impl CustomerOperations for FakeBackend {
    async fn list(&self) -> AppResult<Vec<Customer>> {
        self.begin().await?;
        Ok(self.lock().customers.clone())
    }

    async fn get(&self, id: i64) -> AppResult<Customer> {
        self.begin().await?;
        self.lock()
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found_error("Customer", &id.to_string()))
    }

    async fn create(&self, payload: &CustomerPayload) -> AppResult<Customer> {
        self.begin().await?;
        let mut state = self.lock();
        let customer = Customer {
            id: state.allocate_id(),
            name: payload.name.clone(),
            phone: payload.phone.clone(),
            email: payload.email.clone(),
        };
        state.customers.push(customer.clone());
        Ok(customer)
    }

    async fn update(&self, id: i64, payload: &CustomerPayload) -> AppResult<Customer> {
        self.begin().await?;
        let customer = Customer {
            id,
            name: payload.name.clone(),
            phone: payload.phone.clone(),
            email: payload.email.clone(),
        };
        replace(&mut self.lock().customers, |c| c.id == id, customer.clone(), "Customer", id)?;
        Ok(customer)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.begin().await?;
        remove(&mut self.lock().customers, |c| c.id == id, "Customer", id)
    }
}

#[async_trait::async_trait]
impl ScooterOperations for FakeBackend {
    async fn list(&self, filter: ScooterListFilter) -> AppResult<Vec<Scooter>> {
        self.begin().await?;
        let available_only = filter.available_only.unwrap_or(false);
        Ok(self
            .lock()
            .scooters
            .iter()
            .filter(|s| !available_only || s.is_available())
            .take(filter.limit.map_or(usize::MAX, |limit| limit as usize))
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64) -> AppResult<Scooter> {
        self.begin().await?;
        self.lock()
            .scooters
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| not_found_error("Scooter", &id.to_string()))
    }

    async fn create(&self, payload: &ScooterPayload) -> AppResult<Scooter> {
        self.begin().await?;
        let mut state = self.lock();
        let scooter = scooter_from(state.allocate_id(), payload);
        state.scooters.push(scooter.clone());
        Ok(scooter)
    }

    async fn update(&self, id: i64, payload: &ScooterPayload) -> AppResult<Scooter> {
        self.begin().await?;
        let scooter = scooter_from(id, payload);
        replace(&mut self.lock().scooters, |s| s.id == id, scooter.clone(), "Scooter", id)?;
        Ok(scooter)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.begin().await?;
        remove(&mut self.lock().scooters, |s| s.id == id, "Scooter", id)
    }
}

#[async_trait::async_trait]
impl RentalOperations for FakeBackend {
    async fn list(&self, limit: Option<u32>) -> AppResult<Vec<Rental>> {
        self.begin().await?;
        Ok(self
            .lock()
            .rentals
            .iter()
            .rev()
            .take(limit.map_or(usize::MAX, |limit| limit as usize))
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64) -> AppResult<Rental> {
        self.begin().await?;
        self.lock()
            .rentals
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found_error("Rental", &id.to_string()))
    }

    async fn create(&self, payload: &RentalPayload) -> AppResult<Rental> {
        self.begin().await?;
        let mut state = self.lock();
        let rental = rental_from(state.allocate_id(), payload);
        state.rentals.push(rental.clone());
        Ok(rental)
    }

    async fn update(&self, id: i64, payload: &RentalPayload) -> AppResult<Rental> {
        self.begin().await?;
        let rental = rental_from(id, payload);
        replace(&mut self.lock().rentals, |r| r.id == id, rental.clone(), "Rental", id)?;
        Ok(rental)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.begin().await?;
        remove(&mut self.lock().rentals, |r| r.id == id, "Rental", id)
    }
}

#[async_trait::async_trait]
impl ServiceOperations for FakeBackend {
    async fn list(&self) -> AppResult<Vec<Service>> {
        self.begin().await?;
        Ok(self.lock().services.clone())
    }

    async fn get(&self, id: i64) -> AppResult<Service> {
        self.begin().await?;
        self.lock()
            .services
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| not_found_error("Service", &id.to_string()))
    }

    async fn create(&self, payload: &ServicePayload) -> AppResult<Service> {
        self.begin().await?;
        let mut state = self.lock();
        let service = service_from(state.allocate_id(), payload);
        state.services.push(service.clone());
        if let Some(cost) = payload.cost.filter(|cost| *cost > Decimal::ZERO) {
            state.record_income(TransactionCategory::Service, cost, payload.scooter_info.clone());
        }
        Ok(service)
    }

    async fn update(&self, id: i64, payload: &ServicePayload) -> AppResult<Service> {
        self.begin().await?;
        let service = service_from(id, payload);
        replace(&mut self.lock().services, |s| s.id == id, service.clone(), "Service", id)?;
        Ok(service)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.begin().await?;
        remove(&mut self.lock().services, |s| s.id == id, "Service", id)
    }
}

#[async_trait::async_trait]
impl SparePartOperations for FakeBackend {
    async fn list(&self) -> AppResult<Vec<SparePart>> {
        self.begin().await?;
        Ok(self.lock().spare_parts.clone())
    }

    async fn get(&self, id: i64) -> AppResult<SparePart> {
        self.begin().await?;
        self.lock()
            .spare_parts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found_error("SparePart", &id.to_string()))
    }

    async fn create(&self, payload: &SparePartPayload) -> AppResult<SparePart> {
        self.begin().await?;
        let mut state = self.lock();
        let part = spare_part_from(state.allocate_id(), payload);
        state.spare_parts.push(part.clone());
        Ok(part)
    }

    async fn update(&self, id: i64, payload: &SparePartPayload) -> AppResult<SparePart> {
        self.begin().await?;
        let part = spare_part_from(id, payload);
        replace(&mut self.lock().spare_parts, |p| p.id == id, part.clone(), "SparePart", id)?;
        Ok(part)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.begin().await?;
        remove(&mut self.lock().spare_parts, |p| p.id == id, "SparePart", id)
    }

    async fn sell(&self, request: &SellSparePartRequest) -> AppResult<serde_json::Value> {
        self.begin().await?;
        let mut state = self.lock();
        state.sell_requests.push(request.clone());

        let part = state
            .spare_parts
            .iter_mut()
            .find(|p| p.id == request.spare_part_id)
            .ok_or_else(|| not_found_error("SparePart", &request.spare_part_id.to_string()))?;
        if part.stock < request.quantity {
            return Err(bad_request_error("Insufficient stock"));
        }
        part.stock -= request.quantity;
        let description = format!("{} x{}", part.name, request.quantity);

        state.record_income(TransactionCategory::PartsSale, request.sale_price, description);
        Ok(json!({ "message": "Sale recorded", "spare_part_id": request.spare_part_id }))
    }
}

#[async_trait::async_trait]
impl TransactionOperations for FakeBackend {
    async fn list(&self, filter: &TransactionFilter) -> AppResult<Vec<Transaction>> {
        self.lock().transaction_list_calls += 1;
        self.begin().await?;
        Ok(self.list_transactions(filter))
    }

    async fn create_income(&self, payload: &TransactionPayload) -> AppResult<Transaction> {
        self.begin().await?;
        let mut state = self.lock();
        let transaction = Transaction {
            kind: TransactionType::Income,
            ..transaction_from(state.allocate_id(), payload)
        };
        state.transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn create_expense(&self, payload: &ExpensePayload) -> AppResult<Transaction> {
        self.begin().await?;
        let mut state = self.lock();
        let transaction = Transaction {
            id: state.allocate_id(),
            kind: TransactionType::Expense,
            category: payload.category.clone(),
            description: Some(payload.description.clone()),
            amount: payload.amount,
            date: payload.date,
        };
        state.transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn update(&self, id: i64, payload: &TransactionPayload) -> AppResult<Transaction> {
        self.begin().await?;
        let transaction = transaction_from(id, payload);
        replace(
            &mut self.lock().transactions,
            |t| t.id == id,
            transaction.clone(),
            "Transaction",
            id,
        )?;
        Ok(transaction)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.begin().await?;
        remove(&mut self.lock().transactions, |t| t.id == id, "Transaction", id)
    }
}

#[async_trait::async_trait]
impl FinancialOperations for FakeBackend {
    async fn summary(&self, range: Option<DateRange>) -> AppResult<FinancialSummary> {
        self.lock().summary_calls += 1;
        self.begin().await?;
        Ok(summarize(&self.lock().transactions, range))
    }

    async fn income(&self, range: Option<DateRange>) -> AppResult<CategoryAnalysis> {
        self.begin().await?;
        Ok(self.category_analysis(range, TransactionType::Income))
    }

    async fn expenses(&self, range: Option<DateRange>) -> AppResult<CategoryAnalysis> {
        self.begin().await?;
        Ok(self.category_analysis(range, TransactionType::Expense))
    }

    /// Como el backend real: el mes más reciente primero
    async fn monthly(&self, range: Option<DateRange>) -> AppResult<Vec<MonthlyAnalysis>> {
        self.begin().await?;
        let mut rows = monthly_analysis(&self.lock().transactions, range);
        rows.reverse();
        Ok(rows)
    }
}
