pub mod categories;
pub mod products;

use std::sync::Arc;

use axum::Router;

use crate::core::dispatch::Dispatcher;
use crate::modules::persistence::PersistenceGateway;

/// Build the dispatcher with every use case bound to `gateway`
pub fn build_dispatcher(gateway: Arc<dyn PersistenceGateway>) -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    categories::register_handlers(&mut dispatcher, Arc::clone(&gateway));
    products::register_handlers(&mut dispatcher, gateway);
    dispatcher
}

/// Versioned API routes for both resources
pub fn api_routes(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .merge(categories::routes::routes(Arc::clone(&dispatcher)))
        .merge(products::routes::routes(dispatcher))
}
