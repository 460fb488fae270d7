//! Services module
//!
//! Este módulo contiene la lógica de negocio del dashboard: formularios,
//! cálculo de precios, agregación financiera y la vista que se recarga con
//! cada cambio del libro de transacciones.

pub mod dashboard_service;
pub mod expense_service;
pub mod financial_service;
pub mod financial_view;
pub mod rental_pricing;
pub mod rental_service;
pub mod service_ticket_service;
pub mod spare_part_sale;

#[cfg(test)]
pub(crate) mod fakes;

pub use dashboard_service::{DashboardService, DashboardStats};
pub use expense_service::{ExpenseDraft, ExpenseService};
pub use financial_service::{FinancialAggregate, FinancialService};
pub use financial_view::{FinancialView, ViewState};
pub use rental_pricing::{DerivedPrice, PriceSource, RentalPricing};
pub use rental_service::{RentalDraft, RentalForm, RentalService};
pub use service_ticket_service::{ServiceForm, ServiceTicketService};
pub use spare_part_sale::{SaleForm, SparePartSaleService};
