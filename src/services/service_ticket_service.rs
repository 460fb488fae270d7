//! Servicio de órdenes de taller
//!
//! Una orden con coste positivo genera un ingreso en el backend, así que al
//! guardarla se avisa a la vista financiera.

use std::sync::Arc;

use tracing::{error, info};
use validator::Validate;

use crate::clients::{ScooterListFilter, ScooterOperations, ServiceOperations};
use crate::events::{ChangeOrigin, EventBus};
use crate::models::scooter::Scooter;
use crate::models::service::{Service, ServicePayload};
use crate::utils::errors::AppResult;
use crate::utils::validation::non_blank;

/// Datos del formulario de servicio
#[derive(Debug, Clone)]
pub struct ServiceForm {
    /// Scooters para sugerir `scooter_info`
    pub scooters: Vec<Scooter>,
    pub existing: Option<Service>,
}

/// Servicio de órdenes de taller
#[derive(Clone)]
pub struct ServiceTicketService {
    services: Arc<dyn ServiceOperations>,
    scooters: Arc<dyn ScooterOperations>,
    events: EventBus,
}

impl ServiceTicketService {
    pub fn new(
        services: Arc<dyn ServiceOperations>,
        scooters: Arc<dyn ScooterOperations>,
        events: EventBus,
    ) -> Self {
        Self {
            services,
            scooters,
            events,
        }
    }

    pub async fn prepare_form(&self, service_id: Option<i64>) -> AppResult<ServiceForm> {
        let scooters = self.scooters.list(ScooterListFilter::default());
        match service_id {
            Some(id) => {
                let (scooters, existing) = futures::try_join!(scooters, self.services.get(id))?;
                Ok(ServiceForm {
                    scooters,
                    existing: Some(existing),
                })
            }
            None => Ok(ServiceForm {
                scooters: scooters.await?,
                existing: None,
            }),
        }
    }

    /// Crear o actualizar una orden; publica el cambio sólo si tiene coste
    pub async fn submit(&self, service_id: Option<i64>, payload: ServicePayload) -> AppResult<Service> {
        let payload = ServicePayload {
            scooter_info: payload.scooter_info.trim().to_string(),
            description: non_blank(payload.description),
            ..payload
        };
        payload.validate()?;

        let result = match service_id {
            Some(id) => self.services.update(id, &payload).await,
            None => self.services.create(&payload).await,
        };
        let service = result.map_err(|e| {
            error!("❌ Error guardando servicio: {}", e);
            e
        })?;

        info!("✅ Servicio {} guardado ({})", service.id, service.status.label());
        if payload.produces_income() {
            self.events.publish(ChangeOrigin::Service);
        }
        Ok(service)
    }

    pub async fn list(&self) -> AppResult<Vec<Service>> {
        self.services.list().await
    }

    pub async fn delete(&self, service_id: i64) -> AppResult<()> {
        self.services.delete(service_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::models::service::{ServiceStatus, ServiceType};
    use crate::models::transaction::{TransactionCategory, TransactionFilter};
    use crate::services::fakes::FakeBackend;

    fn payload(cost: Option<Decimal>) -> ServicePayload {
        ServicePayload {
            scooter_info: "  Honda SH 150 ΙΚΥ-1234 ".to_string(),
            service_type: ServiceType::OilChange,
            description: Some(String::new()),
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            cost,
            status: ServiceStatus::Completed,
        }
    }

    #[tokio::test]
    async fn test_costed_service_is_announced() {
        let backend = FakeBackend::default_shared();
        let events = EventBus::new();
        let mut subscription = events.subscribe();
        let service = ServiceTicketService::new(backend.clone(), backend.clone(), events);

        let saved = service.submit(None, payload(Some(Decimal::new(45, 0)))).await.unwrap();
        assert_eq!(saved.scooter_info, "Honda SH 150 ΙΚΥ-1234");
        assert_eq!(saved.description, None);
        assert_eq!(subscription.next_change().await.unwrap().origin(), ChangeOrigin::Service);

        let ledger = backend.list_transactions(&TransactionFilter::default());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].category, TransactionCategory::Service);
    }

    #[tokio::test]
    async fn test_free_service_is_not_announced() {
        let backend = FakeBackend::default_shared();
        let events = EventBus::new();
        let mut subscription = events.subscribe();
        let service = ServiceTicketService::new(backend.clone(), backend.clone(), events);

        service.submit(None, payload(None)).await.unwrap();
        service.submit(None, payload(Some(Decimal::ZERO))).await.unwrap();
        assert_eq!(subscription.drain_pending(), 0);
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_scooter_info_is_rejected_locally() {
        let backend = FakeBackend::default_shared();
        let service = ServiceTicketService::new(backend.clone(), backend.clone(), EventBus::new());

        let mut invalid = payload(None);
        invalid.scooter_info = "   ".to_string();
        let err = service.submit(None, invalid).await.unwrap_err();
        assert!(err.is_validation());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_form_loads_existing_order() {
        let backend = FakeBackend::default_shared();
        let service = ServiceTicketService::new(backend.clone(), backend.clone(), EventBus::new());
        let saved = service.submit(None, payload(None)).await.unwrap();

        let form = service.prepare_form(Some(saved.id)).await.unwrap();
        assert_eq!(form.existing.unwrap().id, saved.id);
        assert!(service.prepare_form(Some(999)).await.unwrap_err().is_not_found());
    }
}
