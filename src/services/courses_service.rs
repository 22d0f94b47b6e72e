use crate::{
    db::models::api::error_codes,
    db::models::course::{CourseFilter, CourseRecord},
    error::{AppError, AppResult},
    routes::courses::{CourseRequest, PatchCourseRequest},
    store::CourseStore,
    validation::course::{dedup_students, effective_name},
    validation::enrollment::{EnrollmentCapValidator, Operation, ProposedCourse},
};

pub struct CoursesService;

impl CoursesService {
    pub fn list(store: &dyn CourseStore, filter: &CourseFilter) -> AppResult<Vec<CourseRecord>> {
        store.list_courses(filter)
    }

    pub fn get(store: &dyn CourseStore, course_id: i32) -> AppResult<CourseRecord> {
        store
            .get_course(course_id)?
            .ok_or_else(|| AppError::not_found("course"))
    }

    pub fn create(
        store: &dyn CourseStore,
        cap: &EnrollmentCapValidator,
        req: &CourseRequest,
    ) -> AppResult<CourseRecord> {
        let students = Self::checked_students(store, req.students.as_deref().unwrap_or_default())?;

        cap.validate(
            store,
            &ProposedCourse {
                name: &req.name,
                course_id: None,
                students: students.len(),
            },
            Operation::Create,
        )?;

        let course = store.create_course(&req.name, &students)?;
        tracing::info!(course_id = course.id, name = %course.name, students = course.students.len(), "Course created");
        Ok(course)
    }

    pub fn replace(
        store: &dyn CourseStore,
        cap: &EnrollmentCapValidator,
        course_id: i32,
        req: &CourseRequest,
    ) -> AppResult<CourseRecord> {
        Self::write(
            store,
            cap,
            course_id,
            Some(&req.name),
            req.students.as_deref(),
            Operation::Replace,
        )
    }

    pub fn patch(
        store: &dyn CourseStore,
        cap: &EnrollmentCapValidator,
        course_id: i32,
        req: &PatchCourseRequest,
    ) -> AppResult<CourseRecord> {
        Self::write(
            store,
            cap,
            course_id,
            req.name.as_deref(),
            req.students.as_deref(),
            Operation::Patch,
        )
    }

    pub fn delete(store: &dyn CourseStore, course_id: i32) -> AppResult<()> {
        if !store.delete_course(course_id)? {
            return Err(AppError::not_found("course"));
        }
        tracing::info!(course_id, "Course deleted");
        Ok(())
    }

    fn write(
        store: &dyn CourseStore,
        cap: &EnrollmentCapValidator,
        course_id: i32,
        name: Option<&str>,
        students: Option<&[i32]>,
        operation: Operation,
    ) -> AppResult<CourseRecord> {
        // ensure course exists
        let existing = Self::get(store, course_id)?;

        let students = students
            .map(|ids| Self::checked_students(store, ids))
            .transpose()?;
        let resulting = students.as_ref().map_or(existing.students.len(), Vec::len);

        cap.validate(
            store,
            &ProposedCourse {
                name: effective_name(name, &existing.name),
                course_id: Some(course_id),
                students: resulting,
            },
            operation,
        )?;

        let updated = store
            .update_course(course_id, name, students.as_deref())?
            .ok_or_else(|| AppError::not_found("course"))?;
        tracing::info!(course_id, ?operation, name = %updated.name, students = updated.students.len(), "Course updated");
        Ok(updated)
    }

    /// Deduplicate and make sure every referenced student exists.
    fn checked_students(store: &dyn CourseStore, ids: &[i32]) -> AppResult<Vec<i32>> {
        let ids = dedup_students(ids);
        let missing = store.missing_students(&ids)?;
        if let Some(first) = missing.first() {
            return Err(AppError::field(
                "students",
                error_codes::INVALID_REFERENCE,
                format!("Invalid pk \"{}\" - object does not exist.", first),
            ));
        }
        Ok(ids)
    }
}
