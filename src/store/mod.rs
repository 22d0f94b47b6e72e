pub mod memory;
pub mod postgres;

use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::db::models::{
    CourseFilter, CourseRecord, NewStudent, StudentChanges, StudentFilter, StudentRecord,
};
use crate::error::{AppError, AppResult};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Read side the enrollment cap check needs.
pub trait EnrollmentCounter {
    /// Count student associations of every course named exactly
    /// `course_name`, leaving out `exclude_course` when given.
    fn count_enrollments(&self, course_name: &str, exclude_course: Option<i32>) -> AppResult<i64>;
}

/// Persistence for courses, students and their associations.
///
/// Student ids passed to course writes must already exist and be free of
/// duplicates; the services check both before calling in. Student lists in
/// returned records are sorted ascending.
pub trait CourseStore: EnrollmentCounter + Send + Sync {
    fn list_courses(&self, filter: &CourseFilter) -> AppResult<Vec<CourseRecord>>;

    fn get_course(&self, course_id: i32) -> AppResult<Option<CourseRecord>>;

    fn create_course(&self, name: &str, students: &[i32]) -> AppResult<CourseRecord>;

    /// `None` leaves the field untouched. Returns `None` if the course is gone.
    fn update_course(
        &self,
        course_id: i32,
        name: Option<&str>,
        students: Option<&[i32]>,
    ) -> AppResult<Option<CourseRecord>>;

    fn delete_course(&self, course_id: i32) -> AppResult<bool>;

    /// Ids from `ids` that do not name a stored student, in input order.
    fn missing_students(&self, ids: &[i32]) -> AppResult<Vec<i32>>;

    fn list_students(&self, filter: &StudentFilter) -> AppResult<Vec<StudentRecord>>;

    fn get_student(&self, student_id: i32) -> AppResult<Option<StudentRecord>>;

    fn create_student(&self, new_student: &NewStudent) -> AppResult<StudentRecord>;

    fn update_student(
        &self,
        student_id: i32,
        changes: &StudentChanges,
    ) -> AppResult<Option<StudentRecord>>;

    fn delete_student(&self, student_id: i32) -> AppResult<bool>;
}

pub fn from_config(config: &Config) -> AppResult<Arc<dyn CourseStore>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let database = config
                .database()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required for postgres storage".to_string()))?;
            let pool = crate::db::create_pool(&database)?;
            tracing::info!(max_connections = database.max_connections, "Database pool ready");
            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}
