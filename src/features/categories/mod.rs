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
    CreateCategoryCommand, CreateCategoryHandler, DeleteCategoryCommand, DeleteCategoryHandler,
    UpdateCategoryCommand, UpdateCategoryHandler,
};
use queries::{
    GetCategoriesHandler, GetCategoriesQuery, GetCategoryByIdHandler, GetCategoryByIdQuery,
};

/// Register every category use case with the dispatcher
pub fn register_handlers(dispatcher: &mut Dispatcher, gateway: Arc<dyn PersistenceGateway>) {
    dispatcher
        .register::<CreateCategoryCommand, _>(CreateCategoryHandler::new(Arc::clone(&gateway)))
        .register::<UpdateCategoryCommand, _>(UpdateCategoryHandler::new(Arc::clone(&gateway)))
        .register::<DeleteCategoryCommand, _>(DeleteCategoryHandler::new(Arc::clone(&gateway)))
        .register::<GetCategoriesQuery, _>(GetCategoriesHandler::new(Arc::clone(&gateway)))
        .register::<GetCategoryByIdQuery, _>(GetCategoryByIdHandler::new(gateway));
}
