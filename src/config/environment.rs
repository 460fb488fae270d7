//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno: URL del backend,
//! timeouts, tarifa diaria por defecto y parámetros de la vista financiera.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::utils::errors::{AppError, AppResult};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub default_daily_rate: Decimal,
    pub dashboard_range_months: u32,
    pub recent_transactions_limit: u32,
    pub transactions_page_size: u32,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(30),
            default_daily_rate: Decimal::new(20, 0),
            dashboard_range_months: 6,
            recent_transactions_limit: 10,
            transactions_page_size: 100,
            log_level: tracing::Level::INFO,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno del proceso
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar la configuración desde una fuente arbitraria de claves.
    ///
    /// Las claves ausentes toman el valor por defecto; las presentes pero
    /// mal formadas producen `AppError::Config`.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let environment = lookup("ENVIRONMENT").unwrap_or(defaults.environment);
        let api_base_url = lookup("API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "API_BASE_URL must be an http(s) URL, got '{}'",
                api_base_url
            )));
        }

        let timeout_secs: u64 = parse_var(&lookup, "API_TIMEOUT_SECS")?
            .unwrap_or(defaults.request_timeout.as_secs());

        let default_daily_rate: Decimal =
            parse_var(&lookup, "DEFAULT_DAILY_RATE")?.unwrap_or(defaults.default_daily_rate);
        if default_daily_rate <= Decimal::ZERO {
            return Err(AppError::Config(
                "DEFAULT_DAILY_RATE must be positive".to_string(),
            ));
        }

        Ok(Self {
            environment,
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            default_daily_rate,
            dashboard_range_months: parse_var(&lookup, "DASHBOARD_RANGE_MONTHS")?
                .unwrap_or(defaults.dashboard_range_months),
            recent_transactions_limit: parse_var(&lookup, "RECENT_TRANSACTIONS_LIMIT")?
                .unwrap_or(defaults.recent_transactions_limit),
            transactions_page_size: parse_var(&lookup, "TRANSACTIONS_PAGE_SIZE")?
                .unwrap_or(defaults.transactions_page_size)
                .max(1),
            log_level: parse_var(&lookup, "LOG_LEVEL")?.unwrap_or(defaults.log_level),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> AppResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{} has an invalid value '{}': {}", key, raw, e))),
    }
}
