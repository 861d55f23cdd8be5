use std::sync::Arc;

use async_trait::async_trait;

use crate::core::dispatch::{Request, RequestHandler};
use crate::core::error::Result;
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::{CategoryChanges, Deactivation, NewCategory};
use crate::modules::persistence::PersistenceGateway;

#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub description: Option<String>,
}

impl Request for CreateCategoryCommand {
    type Response = CategoryResponseDto;
}

impl From<CreateCategoryDto> for CreateCategoryCommand {
    fn from(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCategoryCommand {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl Request for UpdateCategoryCommand {
    type Response = CategoryResponseDto;
}

impl UpdateCategoryCommand {
    pub fn new(id: i32, dto: UpdateCategoryDto) -> Self {
        Self {
            id,
            name: dto.name,
            description: dto.description,
        }
    }
}

/// Logical delete: the category stays stored with `active = false`
#[derive(Debug, Clone, Copy)]
pub struct DeleteCategoryCommand {
    pub id: i32,
}

impl Request for DeleteCategoryCommand {
    type Response = ();
}

pub struct CreateCategoryHandler {
    gateway: Arc<dyn PersistenceGateway>,
}

impl CreateCategoryHandler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RequestHandler<CreateCategoryCommand> for CreateCategoryHandler {
    async fn handle(&self, command: CreateCategoryCommand) -> Result<CategoryResponseDto> {
        tracing::info!(name = %command.name, "Creating category");

        let category = self
            .gateway
            .insert_category(NewCategory {
                name: command.name,
                description: command.description,
                active: true,
            })
            .await
            .map_err(|e| {
                tracing::error!("Failed to create category: {:?}", e);
                e
            })?;

        tracing::info!(category_id = category.id, "Category created");
        Ok(category.into())
    }
}

pub struct UpdateCategoryHandler {
    gateway: Arc<dyn PersistenceGateway>,
}

impl UpdateCategoryHandler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RequestHandler<UpdateCategoryCommand> for UpdateCategoryHandler {
    async fn handle(&self, command: UpdateCategoryCommand) -> Result<CategoryResponseDto> {
        tracing::info!(category_id = command.id, "Updating category");

        let changes = CategoryChanges {
            name: command.name,
            description: command.description,
        };

        let category = self
            .gateway
            .update_category(command.id, changes)
            .await
            .map_err(|e| {
                tracing::warn!(category_id = command.id, "Failed to update category: {}", e);
                e
            })?;

        tracing::info!(category_id = category.id, "Category updated");
        Ok(category.into())
    }
}

pub struct DeleteCategoryHandler {
    gateway: Arc<dyn PersistenceGateway>,
}

impl DeleteCategoryHandler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RequestHandler<DeleteCategoryCommand> for DeleteCategoryHandler {
    async fn handle(&self, command: DeleteCategoryCommand) -> Result<()> {
        tracing::info!(category_id = command.id, "Deactivating category");

        let outcome = self
            .gateway
            .deactivate_category(command.id)
            .await
            .map_err(|e| {
                tracing::warn!(category_id = command.id, "Failed to deactivate category: {}", e);
                e
            })?;

        match outcome {
            Deactivation::Deactivated => {
                tracing::info!(category_id = command.id, "Category deactivated")
            }
            Deactivation::AlreadyInactive => {
                tracing::info!(category_id = command.id, "Category was already inactive")
            }
        }

        Ok(())
    }
}
