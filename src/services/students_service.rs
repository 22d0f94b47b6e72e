use crate::{
    db::models::student::{NewStudent, StudentChanges, StudentFilter, StudentRecord},
    error::{AppError, AppResult},
    routes::students::{PatchStudentRequest, StudentRequest},
    store::CourseStore,
    validation::student::{UpdateStudentChanges, validate_update_student},
};

pub struct StudentsService;

impl StudentsService {
    pub fn list(store: &dyn CourseStore, filter: &StudentFilter) -> AppResult<Vec<StudentRecord>> {
        store.list_students(filter)
    }

    pub fn get(store: &dyn CourseStore, student_id: i32) -> AppResult<StudentRecord> {
        store
            .get_student(student_id)?
            .ok_or_else(|| AppError::not_found("student"))
    }

    pub fn create(store: &dyn CourseStore, req: &StudentRequest) -> AppResult<StudentRecord> {
        let student = store.create_student(&NewStudent {
            name: req.name.clone(),
            birth_date: req.birth_date,
        })?;
        tracing::info!(student_id = student.id, "Student created");
        Ok(student)
    }

    pub fn replace(
        store: &dyn CourseStore,
        student_id: i32,
        req: &StudentRequest,
    ) -> AppResult<StudentRecord> {
        let changes = StudentChanges {
            name: Some(req.name.clone()),
            birth_date: req.birth_date.map(Some),
        };
        Self::apply(store, student_id, &changes)
    }

    pub fn patch(
        store: &dyn CourseStore,
        student_id: i32,
        req: &PatchStudentRequest,
    ) -> AppResult<StudentRecord> {
        validate_update_student(&UpdateStudentChanges {
            name: req.name.as_deref(),
            birth_date: req.birth_date.as_ref().map(Option::as_ref),
        })?;
        let changes = StudentChanges {
            name: req.name.clone(),
            birth_date: req.birth_date,
        };
        Self::apply(store, student_id, &changes)
    }

    pub fn delete(store: &dyn CourseStore, student_id: i32) -> AppResult<()> {
        if !store.delete_student(student_id)? {
            return Err(AppError::not_found("student"));
        }
        tracing::info!(student_id, "Student deleted");
        Ok(())
    }

    fn apply(
        store: &dyn CourseStore,
        student_id: i32,
        changes: &StudentChanges,
    ) -> AppResult<StudentRecord> {
        let updated = store
            .update_student(student_id, changes)?
            .ok_or_else(|| AppError::not_found("student"))?;
        tracing::info!(student_id, "Student updated");
        Ok(updated)
    }
}
