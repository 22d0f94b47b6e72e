pub mod courses;
pub mod students;

use crate::AppState;
use axum::{
    Json, Router,
    routing::get,
};
use serde_json::{Value, json};

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/courses/",
            get(courses::list_courses).post(courses::create_course),
        )
        .route(
            "/courses/:course_id/",
            get(courses::get_course)
                .put(courses::replace_course)
                .patch(courses::patch_course)
                .delete(courses::delete_course),
        )
        .route(
            "/students/",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/students/:student_id/",
            get(students::get_student)
                .put(students::replace_student)
                .patch(students::patch_student)
                .delete(students::delete_student),
        );

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_routes)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
