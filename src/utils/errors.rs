//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del núcleo del dashboard
//! y su traducción a mensajes visibles para el usuario.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Aggregation unavailable: {0}")]
    AggregationUnavailable(Box<AppError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            AppError::Http {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            AppError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

impl AppError {
    /// Código HTTP asociado, si el error vino del backend
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            AppError::NotFound(_) => Some(404),
            AppError::AggregationUnavailable(inner) => inner.status(),
            _ => None,
        }
    }

    /// Errores locales: bloquean el envío y no generan llamada de red
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::BadRequest(_))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Mensaje de cada campo inválido, para mostrarlo junto al campo.
    ///
    /// Los errores sin mensaje propio muestran su código.
    pub fn field_messages(&self) -> BTreeMap<String, String> {
        let mut messages = BTreeMap::new();
        if let AppError::Validation(errors) = self {
            for (field, field_errors) in errors.field_errors() {
                if let Some(first) = field_errors.first() {
                    let message = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| first.code.to_string());
                    messages.insert(field.to_string(), message);
                }
            }
        }
        messages
    }

    /// Mensaje genérico para el usuario final.
    ///
    /// Los errores del backend nunca se muestran literalmente; el detalle
    /// original se registra en el log por quien lo recibe.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => {
                let mut messages: Vec<String> = self.field_messages().into_values().collect();
                messages.dedup();
                if messages.is_empty() {
                    "Παρακαλώ ελέγξτε τα στοιχεία της φόρμας.".to_string()
                } else {
                    messages.join(" ")
                }
            }
            AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound(_) => {
                "Η εγγραφή δεν βρέθηκε. Ίσως έχει διαγραφεί.".to_string()
            }
            AppError::AggregationUnavailable(_) => {
                "Σφάλμα κατά τη φόρτωση των οικονομικών δεδομένων. Παρακαλώ δοκιμάστε ξανά."
                    .to_string()
            }
            AppError::Config(_) => "Σφάλμα ρυθμίσεων εφαρμογής.".to_string(),
            AppError::Http { .. } | AppError::Network(_) | AppError::Decode(_) => {
                "Σφάλμα επικοινωνίας με τον διακομιστή. Παρακαλώ δοκιμάστε ξανά.".to_string()
            }
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, code: &'static str, message: &str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new(code);
    error.message = Some(message.to_string().into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
