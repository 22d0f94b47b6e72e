use crate::db::models::student::{StudentFilter, StudentRecord};
use crate::error::AppResult;
use crate::services::StudentsService;
use crate::validation::{ApiPath, ApiQuery, ValidatedJson};
use crate::validation::rules::validate_not_blank;
use crate::validation::student::validate_birth_date;
use crate::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Deserializer};
use validator::Validate;

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct StudentRequest {
    #[validate(
        length(max = 256, message = "Ensure this field has no more than 256 characters."),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: Option<chrono::NaiveDate>,
}

/// `birth_date: null` clears the date, a missing key leaves it alone.
#[derive(Deserialize, Validate, Debug, Clone, Default)]
pub struct PatchStudentRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub birth_date: Option<Option<chrono::NaiveDate>>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

pub async fn list_students(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<StudentFilter>,
) -> AppResult<Json<Vec<StudentRecord>>> {
    let students = StudentsService::list(state.store.as_ref(), &filter)?;
    Ok(Json(students))
}

pub async fn get_student(
    State(state): State<AppState>,
    ApiPath(student_id): ApiPath<i32>,
) -> AppResult<Json<StudentRecord>> {
    let student = StudentsService::get(state.store.as_ref(), student_id)?;
    Ok(Json(student))
}

pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<StudentRequest>,
) -> AppResult<(StatusCode, Json<StudentRecord>)> {
    let student = StudentsService::create(state.store.as_ref(), &payload)?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn replace_student(
    State(state): State<AppState>,
    ApiPath(student_id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<StudentRequest>,
) -> AppResult<Json<StudentRecord>> {
    let student = StudentsService::replace(state.store.as_ref(), student_id, &payload)?;
    Ok(Json(student))
}

pub async fn patch_student(
    State(state): State<AppState>,
    ApiPath(student_id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<PatchStudentRequest>,
) -> AppResult<Json<StudentRecord>> {
    let student = StudentsService::patch(state.store.as_ref(), student_id, &payload)?;
    Ok(Json(student))
}

pub async fn delete_student(
    State(state): State<AppState>,
    ApiPath(student_id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    StudentsService::delete(state.store.as_ref(), student_id)?;
    Ok(StatusCode::NO_CONTENT)
}
