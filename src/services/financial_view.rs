//! Estado de la vista financiera
//!
//! Mantiene la última carga de la página financiera, escucha
//! `financial-data-changed` para recargar y descarta respuestas que llegan
//! después de que la vista se haya cerrado o de una recarga más reciente.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::events::EventBus;
use crate::models::financial::FinancialSnapshot;
use crate::services::financial_service::FinancialService;
use crate::utils::dates::DateRange;
use crate::utils::errors::AppResult;

/// Estado visible de la vista
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Ready(FinancialSnapshot),
    /// Mensaje genérico para el usuario; los gráficos quedan bloqueados
    Failed(String),
}

impl ViewState {
    pub fn snapshot(&self) -> Option<&FinancialSnapshot> {
        match self {
            ViewState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

struct ViewInner {
    service: FinancialService,
    state: RwLock<ViewState>,
    range: RwLock<DateRange>,
    disposed: AtomicBool,
    generation: AtomicU64,
    listener: Mutex<Option<JoinHandle<()>>>,
}

/// Vista financiera compartible entre tareas
#[derive(Clone)]
pub struct FinancialView {
    inner: Arc<ViewInner>,
}

impl FinancialView {
    pub fn new(service: FinancialService, range: DateRange) -> Self {
        Self {
            inner: Arc::new(ViewInner {
                service,
                state: RwLock::new(ViewState::Loading),
                range: RwLock::new(range),
                disposed: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                listener: Mutex::new(None),
            }),
        }
    }

    pub async fn state(&self) -> ViewState {
        self.inner.state.read().await.clone()
    }

    pub async fn range(&self) -> DateRange {
        *self.inner.range.read().await
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }

    /// Recargar la página financiera para el rango actual.
    ///
    /// Si la vista se cierra o se lanza otra recarga mientras ésta está en
    /// curso, su resultado se descarta.
    pub async fn refresh(&self) -> AppResult<()> {
        if self.is_disposed() {
            return Ok(());
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.inner.state.write().await = ViewState::Loading;
        let range = self.range().await;

        let result = self.inner.service.load_page(range).await;

        if self.is_disposed() || self.inner.generation.load(Ordering::SeqCst) != generation {
            debug!("🕒 Respuesta tardía descartada (recarga {})", generation);
            return Ok(());
        }

        let mut state = self.inner.state.write().await;
        match result {
            Ok(snapshot) => {
                *state = ViewState::Ready(snapshot);
                Ok(())
            }
            Err(e) => {
                error!("❌ Error loading financial data: {}", e);
                *state = ViewState::Failed(e.user_message());
                Err(e)
            }
        }
    }

    /// Cambiar el rango y recargar
    pub async fn set_range(&self, range: DateRange) -> AppResult<()> {
        *self.inner.range.write().await = range;
        self.refresh().await
    }

    /// Escuchar cambios del libro y recargar con cada aviso.
    ///
    /// Los avisos acumulados durante una recarga se agrupan en una sola.
    pub fn listen(&self, bus: &EventBus) {
        let mut subscription = bus.subscribe();
        let view = self.clone();

        let handle = tokio::spawn(async move {
            while let Some(event) = subscription.next_change().await {
                if view.is_disposed() {
                    break;
                }
                let coalesced = subscription.drain_pending();
                info!(
                    "🔄 {} ({:?}), recargando vista financiera (+{} avisos)",
                    event.name(),
                    event.origin(),
                    coalesced
                );
                if let Err(e) = view.refresh().await {
                    debug!("Recarga fallida tras aviso: {}", e);
                }
            }
        });

        if let Ok(mut listener) = self.inner.listener.lock() {
            if let Some(previous) = listener.replace(handle) {
                previous.abort();
            }
        }
    }

    /// Cerrar la vista: deja de escuchar y descarta respuestas pendientes
    pub fn dispose(&self) {
        self.inner.disposed.store(true, Ordering::SeqCst);
        if let Ok(mut listener) = self.inner.listener.lock() {
            if let Some(handle) = listener.take() {
                handle.abort();
            }
        }
    }
}
