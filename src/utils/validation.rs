//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! usadas por los `#[derive(Validate)]` de los payloads y por los borradores
//! de formularios (alquileres, ventas, gastos).

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Mismo criterio laxo que usaba el formulario de clientes
    static ref EMAIL_REGEX: Regex = Regex::new(r"^\S+@\S+\.\S+$").unwrap();
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("Το πεδίο είναι υποχρεωτικό".into());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_REGEX.is_match(value) {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        error.message = Some("Μη έγκυρο email".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que un importe sea estrictamente positivo
pub fn validate_positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value.to_string());
        error.message = Some("Παρακαλώ εισάγετε έγκυρο ποσό".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que un importe no sea negativo
pub fn validate_non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que la fecha final sea estrictamente posterior a la inicial
pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end <= start {
        let mut error = ValidationError::new("date_order");
        error.add_param("start_date".into(), &start.to_string());
        error.add_param("end_date".into(), &end.to_string());
        error.message =
            Some("Η ημερομηνία λήξης πρέπει να είναι μετά την ημερομηνία έναρξης.".into());
        return Err(error);
    }
    Ok(())
}

/// Normaliza campos opcionales de texto: vacío o sólo espacios se omite
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
