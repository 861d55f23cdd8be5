use std::sync::Arc;

use async_trait::async_trait;

use crate::core::dispatch::{Request, RequestHandler};
use crate::core::error::{AppError, Result};
use crate::features::products::dtos::ProductResponseDto;
use crate::modules::persistence::PersistenceGateway;

/// Every product; unlike categories, inactive ones are included
#[derive(Debug, Clone, Copy, Default)]
pub struct GetProductsQuery;

impl Request for GetProductsQuery {
    type Response = Vec<ProductResponseDto>;
}

#[derive(Debug, Clone, Copy)]
pub struct GetProductByIdQuery {
    pub id: i32,
}

impl Request for GetProductByIdQuery {
    type Response = ProductResponseDto;
}

pub struct GetProductsHandler {
    gateway: Arc<dyn PersistenceGateway>,
}

impl GetProductsHandler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RequestHandler<GetProductsQuery> for GetProductsHandler {
    async fn handle(&self, _query: GetProductsQuery) -> Result<Vec<ProductResponseDto>> {
        let products = self.gateway.list_products().await.map_err(|e| {
            tracing::error!("Failed to list products: {:?}", e);
            e
        })?;

        if products.is_empty() {
            tracing::warn!("No products found");
        } else {
            tracing::info!(count = products.len(), "Products loaded");
        }

        Ok(products.into_iter().map(|p| p.into()).collect())
    }
}

pub struct GetProductByIdHandler {
    gateway: Arc<dyn PersistenceGateway>,
}

impl GetProductByIdHandler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RequestHandler<GetProductByIdQuery> for GetProductByIdHandler {
    async fn handle(&self, query: GetProductByIdQuery) -> Result<ProductResponseDto> {
        let product = self.gateway.find_product(query.id).await.map_err(|e| {
            tracing::error!(product_id = query.id, "Failed to get product: {:?}", e);
            e
        })?;

        product.map(|p| p.into()).ok_or_else(|| {
            tracing::warn!(product_id = query.id, "Product not found");
            AppError::NotFound(format!("Product with id {} not found", query.id))
        })
    }
}
