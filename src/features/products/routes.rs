use std::sync::Arc;

use axum::{routing::get, Router};

use crate::core::dispatch::Dispatcher;
use crate::features::products::handlers;

/// Create routes for the products feature
pub fn routes(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route(
            "/v1/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/v1/api/products/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .patch(handlers::update_product_status)
                .delete(handlers::delete_product),
        )
        .with_state(dispatcher)
}
