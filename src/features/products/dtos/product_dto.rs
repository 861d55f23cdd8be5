use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::products::models::Product;

fn default_active() -> bool {
    true
}

/// Request body for creating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    /// Unique product code
    #[validate(length(min = 1))]
    pub code: String,

    #[validate(length(min = 1))]
    pub name: String,

    pub description: Option<String>,

    /// Rounded to two decimal places
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,

    /// Defaults to true when omitted
    #[serde(default = "default_active")]
    pub active: bool,

    pub category_id: i32,
}

/// Request body for a full product update
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(length(min = 1))]
    pub code: String,

    #[validate(length(min = 1))]
    pub name: String,

    pub description: Option<String>,

    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,

    pub active: bool,

    pub category_id: i32,

    pub stock_quantity: i32,
}

/// Request body for a status-only update; omitting `active` changes nothing
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProductStatusDto {
    pub active: Option<bool>,
}

/// Response DTO for product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: i32,
    pub code: String,
    pub name: String,
    /// Empty when the product has no description
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    pub active: bool,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    /// Absent until the first update
    pub updated_at: Option<DateTime<Utc>>,
    pub stock_quantity: i32,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            code: p.code,
            name: p.name,
            description: p.description.unwrap_or_default(),
            price: p.price,
            active: p.active,
            category_id: p.category_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
            stock_quantity: p.stock_quantity,
        }
    }
}
