use std::sync::Arc;

use axum::{routing::get, Router};

use crate::core::dispatch::Dispatcher;
use crate::features::categories::handlers;

/// Create routes for the categories feature
pub fn routes(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route(
            "/v1/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/v1/api/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(dispatcher)
}
