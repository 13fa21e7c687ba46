use std::future::Future;

use serde_json::Value;
use tracing::{debug, info, warn};

use shared_api_client::{rest::ApiResult, RestClient};
use shared_config::AppConfig;
use shared_models::auth::AccessToken;

use crate::models::{CreateProductRequest, InventoryError, Product};

const PRODUCTS_PATH: &str = "/api/products";
/// Older deployments only serve the versioned route.
const LEGACY_PRODUCTS_PATH: &str = "/api/v1/products";

pub struct InventoryService {
    client: RestClient,
}

impl InventoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: RestClient::new(config),
        }
    }

    /// Tries the primary route and retries once on the versioned route when
    /// the primary answers 404. Any other failure is returned as is.
    async fn with_fallback<T, F, Fut>(&self, call: F) -> Result<T, InventoryError>
    where
        F: Fn(&'static str) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        match call(PRODUCTS_PATH).await {
            Err(e) if e.is_not_found() => {
                warn!("{} not found, falling back to {}", PRODUCTS_PATH, LEGACY_PRODUCTS_PATH);
                Ok(call(LEGACY_PRODUCTS_PATH).await?)
            }
            other => Ok(other?),
        }
    }

    pub async fn list_products(
        &self,
        search: Option<&str>,
        low_stock_only: bool,
        token: &AccessToken,
    ) -> Result<Vec<Product>, InventoryError> {
        let client = &self.client;
        let mut products: Vec<Product> = self
            .with_fallback(move |path| client.get::<Vec<Product>>(path, token))
            .await?;
        debug!("Fetched {} products", products.len());

        let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();
        if !needle.is_empty() {
            products.retain(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.category
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            });
        }

        if low_stock_only {
            products.retain(Product::is_low_stock);
        }

        Ok(products)
    }

    pub async fn create_product(
        &self,
        request: CreateProductRequest,
        token: &AccessToken,
    ) -> Result<Value, InventoryError> {
        if request.name.trim().is_empty() {
            return Err(InventoryError::ValidationError("Product name is required".to_string()));
        }
        if request.current_stock.is_some_and(|s| s < 0.0) || request.min_stock.is_some_and(|s| s < 0.0) {
            return Err(InventoryError::ValidationError("Stock quantities cannot be negative".to_string()));
        }

        let client = &self.client;
        let body = &request;
        let created: Value = self
            .with_fallback(move |path| client.post::<Value, _>(path, token, body))
            .await?;

        info!("Product {} created", request.name);
        Ok(created)
    }
}
