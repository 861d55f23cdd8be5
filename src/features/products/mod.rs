pub mod commands;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod queries;
pub mod routes;

use std::sync::Arc;

use crate::core::dispatch::Dispatcher;
use crate::modules::persistence::PersistenceGateway;

use commands::{
    CreateProductCommand, CreateProductHandler, DeleteProductCommand, DeleteProductHandler,
    UpdateProductCommand, UpdateProductHandler, UpdateProductStatusCommand,
    UpdateProductStatusHandler,
};
use queries::{GetProductByIdHandler, GetProductByIdQuery, GetProductsHandler, GetProductsQuery};

/// Register every product use case with the dispatcher
pub fn register_handlers(dispatcher: &mut Dispatcher, gateway: Arc<dyn PersistenceGateway>) {
    dispatcher
        .register::<CreateProductCommand, _>(CreateProductHandler::new(Arc::clone(&gateway)))
        .register::<UpdateProductCommand, _>(UpdateProductHandler::new(Arc::clone(&gateway)))
        .register::<UpdateProductStatusCommand, _>(UpdateProductStatusHandler::new(Arc::clone(
            &gateway,
        )))
        .register::<DeleteProductCommand, _>(DeleteProductHandler::new(Arc::clone(&gateway)))
        .register::<GetProductsQuery, _>(GetProductsHandler::new(Arc::clone(&gateway)))
        .register::<GetProductByIdQuery, _>(GetProductByIdHandler::new(gateway));
}
