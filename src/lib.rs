//! Núcleo del dashboard de la tienda de scooters
//!
//! Gateways HTTP del backend, modelos de dominio, cálculo de precios de
//! alquiler, venta de recambios y agregación financiera.

pub mod clients;
pub mod config;
pub mod events;
pub mod models;
pub mod services;
pub mod utils;
