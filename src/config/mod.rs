//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de entorno del dashboard.

pub mod environment;

pub use environment::*;
