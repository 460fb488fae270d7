//! Clients - Gateways HTTP del backend
//!
//! Un gateway por entidad sobre un `ApiClient` compartido. Cada gateway
//! implementa un trait `*Operations` para poder sustituirlo en los servicios.

pub mod api_client;
pub mod customer_gateway;
pub mod financial_gateway;
pub mod rental_gateway;
pub mod scooter_gateway;
pub mod service_gateway;
pub mod spare_part_gateway;
pub mod transaction_gateway;

pub use api_client::{ApiClient, Resource};
pub use customer_gateway::{CustomerGateway, CustomerOperations};
pub use financial_gateway::{FinancialGateway, FinancialOperations};
pub use rental_gateway::{RentalGateway, RentalOperations};
pub use scooter_gateway::{ScooterGateway, ScooterListFilter, ScooterOperations};
pub use service_gateway::{ServiceGateway, ServiceOperations};
pub use spare_part_gateway::{SparePartGateway, SparePartOperations};
pub use transaction_gateway::{TransactionGateway, TransactionOperations};

/// Conjunto de gateways construidos sobre el mismo cliente HTTP
#[derive(Clone)]
pub struct Gateways {
    pub customers: CustomerGateway,
    pub scooters: ScooterGateway,
    pub rentals: RentalGateway,
    pub services: ServiceGateway,
    pub spare_parts: SparePartGateway,
    pub transactions: TransactionGateway,
    pub financial: FinancialGateway,
}

impl Gateways {
    pub fn new(api: ApiClient) -> Self {
        Self {
            customers: CustomerGateway::new(api.clone()),
            scooters: ScooterGateway::new(api.clone()),
            rentals: RentalGateway::new(api.clone()),
            services: ServiceGateway::new(api.clone()),
            spare_parts: SparePartGateway::new(api.clone()),
            transactions: TransactionGateway::new(api.clone()),
            financial: FinancialGateway::new(api),
        }
    }
}
