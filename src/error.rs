use crate::db::models::api::{ErrorDetail, ErrorResponse, error_codes};
use crate::validation::enrollment::CapExceeded;
use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error(transparent)]
    EnrollmentCap(#[from] CapExceeded),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        code: String,
    },

    #[error("Invalid input: {} field error(s)", .errors.len())]
    InvalidInput { errors: Vec<ErrorDetail> },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, response) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error("Database error"),
                )
            }
            AppError::Pool(ref e) => {
                tracing::error!("Connection pool error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error("Connection error"),
                )
            }
            AppError::EnrollmentCap(ref e) => {
                tracing::info!(course = %e.course, enrolled = e.enrolled, cap = e.cap, "Enrollment cap exceeded");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::bad_request(
                        &e.to_string(),
                        error_codes::ENROLLMENT_CAP_EXCEEDED,
                        Some("students"),
                    ),
                )
            }
            AppError::Validation {
                ref message,
                ref field,
                ref code,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::bad_request(message, code, field.as_deref()),
            ),
            AppError::InvalidInput { errors } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::validation_error(errors),
            ),
            AppError::NotFound { ref resource } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::not_found(&format!("{} not found", resource)),
            ),
            AppError::Config(ref e) => {
                tracing::error!("Configuration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error("Configuration error"),
                )
            }
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error("Internal server error"),
                )
            }
        };

        (status, Json(response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

// 便捷的错误创建函数
impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
            code: "BAD_REQUEST".to_string(),
        }
    }

    pub fn field(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            code: code.to_string(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_exceeded_is_a_client_error() {
        let err = AppError::from(CapExceeded {
            course: "algebra".to_string(),
            enrolled: 3,
            cap: 3,
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::not_found("course");
        assert_eq!(err.to_string(), "Not found: course");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_errors_map_to_500() {
        let err = AppError::internal("store poisoned");
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
