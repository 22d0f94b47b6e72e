pub mod course;
pub mod enrollment;
pub mod student;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query},
    http::{Request, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    db::models::api::{error_codes, ErrorDetail},
    error::AppError,
};

/// 验证的 JSON 提取器
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::field("body", error_codes::INVALID_JSON, rejection.body_text())
            })?;

        value.validate().map_err(|errors| AppError::InvalidInput {
            errors: field_error_details(&errors),
        })?;

        Ok(ValidatedJson(value))
    }
}

/// `Path` whose rejection is rendered through `AppError`.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::field("path", error_codes::INVALID_PATH, rejection.body_text())
            })?;
        Ok(ApiPath(value))
    }
}

/// `Query` whose rejection is rendered through `AppError`.
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::field("query", error_codes::INVALID_QUERY, rejection.body_text())
            })?;
        Ok(ApiQuery(value))
    }
}

fn field_error_details(errors: &validator::ValidationErrors) -> Vec<ErrorDetail> {
    let mut details: Vec<ErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| ErrorDetail {
                field: Some(field.to_string()),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field: {}", field)),
            })
        })
        .collect();
    // field_errors() is a HashMap; keep the response stable
    details.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    details
}

/// 常用验证规则
pub mod rules {
    use validator::ValidationError;

    /// 名称不能只包含空白字符
    pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            let mut error = ValidationError::new("blank");
            error.message = Some("This field may not be blank.".into());
            return Err(error);
        }
        Ok(())
    }

    /// 学生 ID 必须为正数
    pub fn validate_student_ids(ids: &[i32]) -> Result<(), ValidationError> {
        if ids.iter().any(|id| *id <= 0) {
            let mut error = ValidationError::new("invalid_pk");
            error.message = Some("Student ids must be positive integers.".into());
            return Err(error);
        }
        Ok(())
    }
}
