use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Stored product row (`productos`)
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub active: bool,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub stock_quantity: i32,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub active: bool,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub stock_quantity: i32,
}

/// Full replacement of every mutable product field
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub active: bool,
    pub category_id: i32,
    pub stock_quantity: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct ProductStatusChange {
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}
