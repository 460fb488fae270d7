//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! formato de importes y cálculo de fechas.

pub mod dates;
pub mod errors;
pub mod money;
pub mod validation;

pub use errors::{AppError, AppResult};
