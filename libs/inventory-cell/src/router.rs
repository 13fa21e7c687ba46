use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use shared_config::AppConfig;
use shared_utils::extractor::access_token_middleware;

use crate::handlers;

pub fn inventory_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/products", get(handlers::list_products).post(handlers::create_product))
        .layer(middleware::from_fn_with_state(state.clone(), access_token_middleware))
        .with_state(state)
}
