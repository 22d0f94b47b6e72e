use crate::db::models::course::{CourseFilter, CourseRecord};
use crate::error::AppResult;
use crate::services::CoursesService;
use crate::validation::{ApiPath, ApiQuery, ValidatedJson};
use crate::validation::rules::{validate_not_blank, validate_student_ids};
use crate::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

// 请求体定义
#[derive(Deserialize, Validate, Debug, Clone)]
pub struct CourseRequest {
    #[validate(
        length(max = 256, message = "Ensure this field has no more than 256 characters."),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[validate(custom(function = "validate_student_ids"))]
    pub students: Option<Vec<i32>>,
}

#[derive(Deserialize, Validate, Debug, Clone, Default)]
pub struct PatchCourseRequest {
    #[validate(
        length(max = 256, message = "Ensure this field has no more than 256 characters."),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    #[validate(custom(function = "validate_student_ids"))]
    pub students: Option<Vec<i32>>,
}

/// 获取课程列表
pub async fn list_courses(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<CourseFilter>,
) -> AppResult<Json<Vec<CourseRecord>>> {
    let courses = CoursesService::list(state.store.as_ref(), &filter)?;
    Ok(Json(courses))
}

/// 获取指定课程
pub async fn get_course(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<i32>,
) -> AppResult<Json<CourseRecord>> {
    let course = CoursesService::get(state.store.as_ref(), course_id)?;
    Ok(Json(course))
}

/// 创建课程
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CourseRequest>,
) -> AppResult<(StatusCode, Json<CourseRecord>)> {
    let course = CoursesService::create(state.store.as_ref(), &state.enrollment, &payload)?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// 整体更新课程
pub async fn replace_course(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<CourseRequest>,
) -> AppResult<Json<CourseRecord>> {
    let course = CoursesService::replace(state.store.as_ref(), &state.enrollment, course_id, &payload)?;
    Ok(Json(course))
}

/// 部分更新课程
pub async fn patch_course(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<PatchCourseRequest>,
) -> AppResult<Json<CourseRecord>> {
    let course = CoursesService::patch(state.store.as_ref(), &state.enrollment, course_id, &payload)?;
    Ok(Json(course))
}

/// 删除课程
pub async fn delete_course(
    State(state): State<AppState>,
    ApiPath(course_id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    CoursesService::delete(state.store.as_ref(), course_id)?;
    Ok(StatusCode::NO_CONTENT)
}
