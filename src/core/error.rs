use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::modules::persistence::PersistenceError;
use crate::shared::types::ApiResponse;

/// Message returned to clients whenever an infrastructure fault is hidden
pub const GENERIC_ERROR_MESSAGE: &str =
    "Failed to process the request, please try again later.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Persistence(ref e) => match e {
                PersistenceError::NotFound { .. } => (StatusCode::NOT_FOUND, e.to_string(), None),
                // Constraint messages are safe to echo; they only name the violated index
                PersistenceError::ConstraintViolation(msg) => {
                    tracing::warn!("Constraint violation: {}", msg);
                    (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), None)
                }
                PersistenceError::Unavailable(_) | PersistenceError::Unknown(_) => {
                    tracing::error!("Persistence error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        GENERIC_ERROR_MESSAGE.to_string(),
                        None,
                    )
                }
            },
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::PayloadTooLarge(ref msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, msg.clone(), None)
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERROR_MESSAGE.to_string(),
                    None,
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
