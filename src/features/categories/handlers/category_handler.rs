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
use crate::features::categories::commands::{
    CreateCategoryCommand, DeleteCategoryCommand, UpdateCategoryCommand,
};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::queries::{GetCategoriesQuery, GetCategoryByIdQuery};
use crate::shared::types::ApiResponse;

/// List active categories
///
/// Answers 204 when there is no active category.
#[utoipa::path(
    get,
    path = "/v1/api/categories",
    responses(
        (status = 200, description = "List of active categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 204, description = "No active categories"),
        (status = 500, description = "Unexpected error")
    ),
    tag = "categories"
)]
pub async fn list_categories(State(dispatcher): State<Arc<Dispatcher>>) -> Result<Response> {
    let categories = dispatcher.send(GetCategoriesQuery).await?;

    if categories.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(ApiResponse::list(categories)).into_response())
}

/// Create a category
#[utoipa::path(
    post,
    path = "/v1/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Unexpected error")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(dispatcher): State<Arc<Dispatcher>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<Response> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = dispatcher.send(CreateCategoryCommand::from(dto)).await?;
    let location = format!("/v1/api/categories/{}", category.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(Some(category), None, None)),
    )
        .into_response())
}

/// Get a category by id, active or not
#[utoipa::path(
    get,
    path = "/v1/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Unexpected error")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(dispatcher): State<Arc<Dispatcher>>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = dispatcher.send(GetCategoryByIdQuery { id }).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Replace a category's name and description
#[utoipa::path(
    put,
    path = "/v1/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Unexpected error")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(dispatcher): State<Arc<Dispatcher>>,
    AppPath(id): AppPath<i32>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = dispatcher.send(UpdateCategoryCommand::new(id, dto)).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category (soft delete)
#[utoipa::path(
    delete,
    path = "/v1/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deactivated"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Unexpected error")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(dispatcher): State<Arc<Dispatcher>>,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode> {
    dispatcher.send(DeleteCategoryCommand { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}
