use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::core::dispatch::Dispatcher;
use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::products::commands::{
    CreateProductCommand, DeleteProductCommand, UpdateProductCommand, UpdateProductStatusCommand,
};
use crate::features::products::dtos::{
    CreateProductDto, ProductResponseDto, UpdateProductDto, UpdateProductStatusDto,
};
use crate::features::products::queries::{GetProductByIdQuery, GetProductsQuery};
use crate::shared::types::ApiResponse;

/// List all products, active or not
#[utoipa::path(
    get,
    path = "/v1/api/products",
    responses(
        (status = 200, description = "List of products", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 204, description = "No products"),
        (status = 500, description = "Unexpected error")
    ),
    tag = "products"
)]
pub async fn list_products(State(dispatcher): State<Arc<Dispatcher>>) -> Result<Response> {
    let products = dispatcher.send(GetProductsQuery).await?;

    if products.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(ApiResponse::list(products)).into_response())
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/v1/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Unexpected error")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(dispatcher): State<Arc<Dispatcher>>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = dispatcher.send(GetProductByIdQuery { id }).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// Create a product
///
/// Stock starts at zero. A duplicate `code` fails with the database's message.
#[utoipa::path(
    post,
    path = "/v1/api/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Duplicate code or unexpected error")
    ),
    tag = "products"
)]
pub async fn create_product(
    State(dispatcher): State<Arc<Dispatcher>>,
    AppJson(dto): AppJson<CreateProductDto>,
) -> Result<Response> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = dispatcher.send(CreateProductCommand::from(dto)).await?;
    let location = format!("/v1/api/products/{}", product.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(Some(product), None, None)),
    )
        .into_response())
}

/// Replace every mutable field of a product
#[utoipa::path(
    put,
    path = "/v1/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Duplicate code or unexpected error")
    ),
    tag = "products"
)]
pub async fn update_product(
    State(dispatcher): State<Arc<Dispatcher>>,
    AppPath(id): AppPath<i32>,
    AppJson(dto): AppJson<UpdateProductDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = dispatcher.send(UpdateProductCommand::new(id, dto)).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// Update only the active flag of a product
#[utoipa::path(
    patch,
    path = "/v1/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProductStatusDto,
    responses(
        (status = 200, description = "Product status updated", body = ApiResponse<ProductResponseDto>),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Unexpected error")
    ),
    tag = "products"
)]
pub async fn update_product_status(
    State(dispatcher): State<Arc<Dispatcher>>,
    AppPath(id): AppPath<i32>,
    AppJson(dto): AppJson<UpdateProductStatusDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = dispatcher
        .send(UpdateProductStatusCommand::new(id, dto))
        .await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// Delete a product permanently
#[utoipa::path(
    delete,
    path = "/v1/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Unexpected error")
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(dispatcher): State<Arc<Dispatcher>>,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode> {
    dispatcher.send(DeleteProductCommand { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}
