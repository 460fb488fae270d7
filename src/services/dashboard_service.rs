//! Estadísticas de la página de inicio
//!
//! Cuatro consultas independientes lanzadas a la vez; las cifras derivadas se
//! calculan sólo cuando han terminado todas.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info};

use crate::clients::{
    CustomerOperations, FinancialOperations, RentalOperations, ScooterListFilter, ScooterOperations,
};
use crate::models::customer::Customer;
use crate::models::financial::MonthlyAnalysis;
use crate::models::rental::{Rental, RentalStatus};
use crate::models::scooter::Scooter;
use crate::services::financial_service::into_chronological;
use crate::utils::errors::AppResult;

/// Alquileres recientes que muestra la página de inicio
pub const RECENT_RENTALS_LIMIT: u32 = 5;

/// Cifras de la página de inicio
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    pub customers: usize,
    /// Activos entre los alquileres recientes
    pub active_rentals: usize,
    /// Suma de ingresos de todas las filas mensuales del backend
    pub total_income: Decimal,
    pub available_scooters: usize,
    /// Orden cronológico
    pub monthly: Vec<MonthlyAnalysis>,
    pub recent_rentals: Vec<Rental>,
}

impl DashboardStats {
    pub fn compute(
        customers: &[Customer],
        recent_rentals: Vec<Rental>,
        monthly: Vec<MonthlyAnalysis>,
        scooters: &[Scooter],
    ) -> Self {
        Self {
            customers: customers.len(),
            active_rentals: recent_rentals
                .iter()
                .filter(|rental| rental.status == RentalStatus::Active)
                .count(),
            total_income: monthly.iter().map(|row| row.income).sum(),
            available_scooters: scooters.iter().filter(|s| s.is_available()).count(),
            monthly: into_chronological(monthly),
            recent_rentals,
        }
    }
}

/// Servicio de la página de inicio
#[derive(Clone)]
pub struct DashboardService {
    customers: Arc<dyn CustomerOperations>,
    rentals: Arc<dyn RentalOperations>,
    financial: Arc<dyn FinancialOperations>,
    scooters: Arc<dyn ScooterOperations>,
}

impl DashboardService {
    pub fn new(
        customers: Arc<dyn CustomerOperations>,
        rentals: Arc<dyn RentalOperations>,
        financial: Arc<dyn FinancialOperations>,
        scooters: Arc<dyn ScooterOperations>,
    ) -> Self {
        Self {
            customers,
            rentals,
            financial,
            scooters,
        }
    }

    pub async fn load(&self) -> AppResult<DashboardStats> {
        let (customers, rentals, monthly, scooters) = futures::try_join!(
            self.customers.list(),
            self.rentals.list(Some(RECENT_RENTALS_LIMIT)),
            self.financial.monthly(None),
            self.scooters.list(ScooterListFilter::default()),
        )
        .map_err(|e| {
            error!("❌ Failed to fetch dashboard data: {}", e);
            e
        })?;

        let stats = DashboardStats::compute(&customers, rentals, monthly, &scooters);
        info!(
            "🏠 Dashboard: {} clientes, {} alquileres activos, {} scooters disponibles",
            stats.customers, stats.active_rentals, stats.available_scooters
        );
        Ok(stats)
    }
}
