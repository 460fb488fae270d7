//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos tal como los intercambia el
//! backend REST del taller, más los payloads de escritura validados.

pub mod customer;
pub mod financial;
pub mod rental;
pub mod scooter;
pub mod service;
pub mod spare_part;
pub mod transaction;

pub use customer::{Customer, CustomerPayload};
pub use financial::{CategoryAnalysis, CategoryTotal, FinancialSnapshot, FinancialSummary, MonthlyAnalysis};
pub use rental::{Rental, RentalPayload, RentalStatus};
pub use scooter::{Scooter, ScooterCondition, ScooterPayload};
pub use service::{Service, ServicePayload, ServiceStatus, ServiceType};
pub use spare_part::{SellSparePartRequest, SparePart, SparePartCategory, SparePartPayload};
pub use transaction::{
    ExpensePayload, Transaction, TransactionCategory, TransactionFilter, TransactionPayload,
    TransactionType,
};
