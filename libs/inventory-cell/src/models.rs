use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use shared_api_client::ApiClientError;
use shared_models::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit_of_measure: Option<String>,
    #[serde(default)]
    pub current_stock: Option<f64>,
    #[serde(default)]
    pub min_stock: Option<f64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_active() -> bool {
    true
}

impl Product {
    /// At or below the minimum stock. Products without a minimum never are.
    pub fn is_low_stock(&self) -> bool {
        match (self.current_stock, self.min_stock) {
            (Some(current), Some(min)) => current <= min,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_stock: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub low_stock: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Api(#[from] ApiClientError),
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::ValidationError(msg) => AppError::ValidationError(msg),
            InventoryError::Api(e) => e.into(),
        }
    }
}
