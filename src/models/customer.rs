//! Modelo de Customer
//!
//! Este módulo contiene el struct Customer y su payload de escritura.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{non_blank, validate_email, validate_not_blank};

/// Cliente tal como lo devuelve el backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request para crear o actualizar un cliente
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct CustomerPayload {
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[validate(custom = "validate_not_blank")]
    pub phone: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_email")]
    pub email: Option<String>,
}

impl CustomerPayload {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: Option<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
            email: non_blank(email),
        }
    }
}

impl From<&Customer> for CustomerPayload {
    fn from(customer: &Customer) -> Self {
        Self::new(customer.name.clone(), customer.phone.clone(), customer.email.clone())
    }
}
