use std::sync::Arc;
use axum::{
    extract::{Extension, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::AccessToken;
use shared_models::error::AppError;
use shared_models::notice::Notice;

use crate::models::{CreateProductRequest, ProductQuery};
use crate::services::InventoryService;

#[axum::debug_handler]
pub async fn list_products(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Value>, AppError> {
    let service = InventoryService::new(&config);

    let products = service
        .list_products(query.search.as_deref(), query.low_stock.unwrap_or(false), &token)
        .await?;
    let low_stock_count = products.iter().filter(|p| p.is_low_stock()).count();

    Ok(Json(json!({
        "products": products,
        "total": products.len(),
        "low_stock_count": low_stock_count
    })))
}

#[axum::debug_handler]
pub async fn create_product(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
    Json(request): Json<CreateProductRequest>,
) -> Result<Json<Value>, AppError> {
    let service = InventoryService::new(&config);

    let product = service.create_product(request, &token).await?;

    Ok(Json(json!({
        "success": true,
        "notice": Notice::success("Product created successfully"),
        "product": product
    })))
}
