use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::dispatch::{Request, RequestHandler};
use crate::core::error::Result;
use crate::features::products::dtos::{
    CreateProductDto, ProductResponseDto, UpdateProductDto, UpdateProductStatusDto,
};
use crate::features::products::models::{NewProduct, ProductChanges, ProductStatusChange};
use crate::modules::persistence::PersistenceGateway;
use crate::shared::constants::PRICE_SCALE;

/// Round to the stored scale the same way `NUMERIC(18, 2)` does
fn normalize_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub active: bool,
    pub category_id: i32,
}

impl Request for CreateProductCommand {
    type Response = ProductResponseDto;
}

impl From<CreateProductDto> for CreateProductCommand {
    fn from(dto: CreateProductDto) -> Self {
        Self {
            code: dto.code,
            name: dto.name,
            description: dto.description,
            price: dto.price,
            active: dto.active,
            category_id: dto.category_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub active: bool,
    pub category_id: i32,
    pub stock_quantity: i32,
}

impl Request for UpdateProductCommand {
    type Response = ProductResponseDto;
}

impl UpdateProductCommand {
    pub fn new(id: i32, dto: UpdateProductDto) -> Self {
        Self {
            id,
            code: dto.code,
            name: dto.name,
            description: dto.description,
            price: dto.price,
            active: dto.active,
            category_id: dto.category_id,
            stock_quantity: dto.stock_quantity,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UpdateProductStatusCommand {
    pub id: i32,
    pub active: Option<bool>,
}

impl Request for UpdateProductStatusCommand {
    type Response = ProductResponseDto;
}

impl UpdateProductStatusCommand {
    pub fn new(id: i32, dto: UpdateProductStatusDto) -> Self {
        Self {
            id,
            active: dto.active,
        }
    }
}

/// Physical delete
#[derive(Debug, Clone, Copy)]
pub struct DeleteProductCommand {
    pub id: i32,
}

impl Request for DeleteProductCommand {
    type Response = ();
}

pub struct CreateProductHandler {
    gateway: Arc<dyn PersistenceGateway>,
}

impl CreateProductHandler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RequestHandler<CreateProductCommand> for CreateProductHandler {
    async fn handle(&self, command: CreateProductCommand) -> Result<ProductResponseDto> {
        tracing::info!(
            code = %command.code,
            name = %command.name,
            category_id = command.category_id,
            "Creating product"
        );

        let new_product = NewProduct {
            price: normalize_price(command.price),
            code: command.code,
            name: command.name,
            description: command.description,
            active: command.active,
            category_id: command.category_id,
            created_at: Utc::now(),
            stock_quantity: 0,
        };
        let code = new_product.code.clone();

        let product = self
            .gateway
            .insert_product(new_product)
            .await
            .map_err(|e| {
                tracing::error!(code = %code, "Failed to create product: {}", e);
                e
            })?;

        tracing::info!(product_id = product.id, code = %product.code, "Product created");
        Ok(product.into())
    }
}

pub struct UpdateProductHandler {
    gateway: Arc<dyn PersistenceGateway>,
}

impl UpdateProductHandler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RequestHandler<UpdateProductCommand> for UpdateProductHandler {
    async fn handle(&self, command: UpdateProductCommand) -> Result<ProductResponseDto> {
        tracing::info!(product_id = command.id, "Updating product");

        let changes = ProductChanges {
            price: normalize_price(command.price),
            code: command.code,
            name: command.name,
            description: command.description,
            active: command.active,
            category_id: command.category_id,
            stock_quantity: command.stock_quantity,
            updated_at: Utc::now(),
        };

        let product = self
            .gateway
            .update_product(command.id, changes)
            .await
            .map_err(|e| {
                tracing::warn!(product_id = command.id, "Failed to update product: {}", e);
                e
            })?;

        tracing::info!(product_id = product.id, "Product updated");
        Ok(product.into())
    }
}

pub struct UpdateProductStatusHandler {
    gateway: Arc<dyn PersistenceGateway>,
}

impl UpdateProductStatusHandler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RequestHandler<UpdateProductStatusCommand> for UpdateProductStatusHandler {
    async fn handle(&self, command: UpdateProductStatusCommand) -> Result<ProductResponseDto> {
        tracing::info!(
            product_id = command.id,
            active = ?command.active,
            "Updating product status"
        );

        let change = command.active.map(|active| ProductStatusChange {
            active,
            updated_at: Utc::now(),
        });

        let product = self
            .gateway
            .update_product_status(command.id, change)
            .await
            .map_err(|e| {
                tracing::warn!(
                    product_id = command.id,
                    "Failed to update product status: {}",
                    e
                );
                e
            })?;

        tracing::info!(
            product_id = product.id,
            active = product.active,
            "Product status updated"
        );
        Ok(product.into())
    }
}

pub struct DeleteProductHandler {
    gateway: Arc<dyn PersistenceGateway>,
}

impl DeleteProductHandler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RequestHandler<DeleteProductCommand> for DeleteProductHandler {
    async fn handle(&self, command: DeleteProductCommand) -> Result<()> {
        tracing::info!(product_id = command.id, "Deleting product");

        self.gateway
            .delete_product(command.id)
            .await
            .map_err(|e| {
                tracing::warn!(product_id = command.id, "Failed to delete product: {}", e);
                e
            })?;

        tracing::info!(product_id = command.id, "Product deleted");
        Ok(())
    }
}
