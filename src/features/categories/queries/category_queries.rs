use std::sync::Arc;

use async_trait::async_trait;

use crate::core::dispatch::{Request, RequestHandler};
use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::modules::persistence::PersistenceGateway;

/// Active categories only, by ascending id
#[derive(Debug, Clone, Copy, Default)]
pub struct GetCategoriesQuery;

impl Request for GetCategoriesQuery {
    type Response = Vec<CategoryResponseDto>;
}

/// Any category by id, active or not
#[derive(Debug, Clone, Copy)]
pub struct GetCategoryByIdQuery {
    pub id: i32,
}

impl Request for GetCategoryByIdQuery {
    type Response = CategoryResponseDto;
}

pub struct GetCategoriesHandler {
    gateway: Arc<dyn PersistenceGateway>,
}

impl GetCategoriesHandler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RequestHandler<GetCategoriesQuery> for GetCategoriesHandler {
    async fn handle(&self, _query: GetCategoriesQuery) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.gateway.list_active_categories().await.map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            e
        })?;

        if categories.is_empty() {
            tracing::warn!("No active categories found");
        } else {
            tracing::info!(count = categories.len(), "Active categories loaded");
        }

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }
}

pub struct GetCategoryByIdHandler {
    gateway: Arc<dyn PersistenceGateway>,
}

impl GetCategoryByIdHandler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RequestHandler<GetCategoryByIdQuery> for GetCategoryByIdHandler {
    async fn handle(&self, query: GetCategoryByIdQuery) -> Result<CategoryResponseDto> {
        let category = self.gateway.find_category(query.id).await.map_err(|e| {
            tracing::error!(category_id = query.id, "Failed to get category: {:?}", e);
            e
        })?;

        category.map(|c| c.into()).ok_or_else(|| {
            tracing::warn!(category_id = query.id, "Category not found");
            AppError::NotFound(format!("Category with id {} not found", query.id))
        })
    }
}
