//! Error handling for the service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Database error".to_string(),
                )
            }
            AppError::Pricing(e) => {
                let status = match e {
                    PricingError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                    PricingError::PackageNotEligible => StatusCode::NOT_FOUND,
                    // Valid request, but the package configuration cannot
                    // price it: unprocessable rather than not found.
                    PricingError::NoIntervalCovers { .. }
                    | PricingError::RoomNotConfiguredForInterval { .. }
                    | PricingError::MealPlanNotAvailable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, e.error_type(), e.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error_type": error_type,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
