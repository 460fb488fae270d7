//! Bus de eventos en proceso
//!
//! Los flujos que generan transacciones (alquileres, servicios con coste,
//! ventas de recambios, gastos, borrados) publican `financial-data-changed`;
//! la vista financiera se suscribe y recarga sus agregados.
//!
//! Entrega al menos una vez y sin garantías fuertes: eventos duplicados sólo
//! provocan recargas redundantes, y un suscriptor que se queda atrás recibe
//! un único aviso en lugar de los eventos perdidos.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Nombre del evento publicado tras cualquier cambio del libro
pub const FINANCIAL_DATA_CHANGED: &str = "financial-data-changed";

const CHANNEL_CAPACITY: usize = 64;

/// Flujo que originó el cambio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOrigin {
    Rental,
    Service,
    SparePartSale,
    Expense,
    Income,
    TransactionUpdated,
    TransactionDeleted,
    /// Avisos perdidos por un suscriptor retrasado
    Unknown,
}

/// Evento del dominio financiero
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum FinancialEvent {
    #[serde(rename = "financial-data-changed")]
    DataChanged {
        origin: ChangeOrigin,
        at: DateTime<Utc>,
    },
}

impl FinancialEvent {
    pub fn data_changed(origin: ChangeOrigin) -> Self {
        FinancialEvent::DataChanged {
            origin,
            at: Utc::now(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FinancialEvent::DataChanged { .. } => FINANCIAL_DATA_CHANGED,
        }
    }

    pub fn origin(&self) -> ChangeOrigin {
        match self {
            FinancialEvent::DataChanged { origin, .. } => *origin,
        }
    }
}

/// Bus de eventos sobre un canal broadcast de tokio
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<FinancialEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publicar un cambio; devuelve cuántos suscriptores lo recibirán.
    ///
    /// Sin suscriptores el evento se descarta: no hay vista que refrescar.
    pub fn publish(&self, origin: ChangeOrigin) -> usize {
        let event = FinancialEvent::data_changed(origin);
        match self.sender.send(event) {
            Ok(receivers) => {
                debug!("📣 {} ({:?}) → {} suscriptores", FINANCIAL_DATA_CHANGED, origin, receivers);
                receivers
            }
            Err(_) => {
                debug!("📣 {} ({:?}) sin suscriptores", FINANCIAL_DATA_CHANGED, origin);
                0
            }
        }
    }

    pub fn subscribe(&self) -> EventSubscription {
        EventSubscription {
            receiver: self.sender.subscribe(),
        }
    }
}

/// Suscripción a los eventos financieros
pub struct EventSubscription {
    receiver: broadcast::Receiver<FinancialEvent>,
}

impl EventSubscription {
    /// Esperar el siguiente cambio; `None` cuando el bus ya no existe
    pub async fn next_change(&mut self) -> Option<FinancialEvent> {
        match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("⚠️ Suscriptor retrasado, {} eventos agrupados en uno", skipped);
                Some(FinancialEvent::data_changed(ChangeOrigin::Unknown))
            }
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }

    /// Consumir los avisos pendientes sin esperar; devuelve cuántos había
    pub fn drain_pending(&mut self) -> usize {
        let mut pending = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(_) => pending += 1,
                Err(broadcast::error::TryRecvError::Lagged(_)) => pending += 1,
                Err(_) => break,
            }
        }
        pending
    }
}
