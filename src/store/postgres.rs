use std::collections::HashMap;

use diesel::prelude::*;

use super::{CourseStore, EnrollmentCounter};
use crate::db::DbPool;
use crate::db::models::{
    Course, CourseFilter, CourseRecord, CourseStudent, NewCourse, NewStudent, Student,
    StudentChanges, StudentFilter, StudentRecord,
};
use crate::db::repositories::{CourseRepo, StudentRepo};
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn course_records(conn: &mut PgConnection, rows: Vec<Course>) -> AppResult<Vec<CourseRecord>> {
        let ids: Vec<i32> = rows.iter().map(|c| c.id).collect();
        let mut by_course = group(CourseRepo::enrollments_for(conn, &ids)?, |e| (e.course_id, e.student_id));
        Ok(rows
            .into_iter()
            .map(|course| {
                let students = by_course.remove(&course.id).unwrap_or_default();
                CourseRecord::from_row(course, students)
            })
            .collect())
    }

    fn student_records(conn: &mut PgConnection, rows: Vec<Student>) -> AppResult<Vec<StudentRecord>> {
        let ids: Vec<i32> = rows.iter().map(|s| s.id).collect();
        let mut by_student = group(StudentRepo::enrollments_for(conn, &ids)?, |e| (e.student_id, e.course_id));
        Ok(rows
            .into_iter()
            .map(|student| {
                let courses = by_student.remove(&student.id).unwrap_or_default();
                StudentRecord::from_row(student, courses)
            })
            .collect())
    }

    fn single_course(conn: &mut PgConnection, course: Course) -> AppResult<CourseRecord> {
        Self::course_records(conn, vec![course])?
            .pop()
            .ok_or_else(|| AppError::internal("course row vanished while loading enrollments"))
    }

    fn single_student(conn: &mut PgConnection, student: Student) -> AppResult<StudentRecord> {
        Self::student_records(conn, vec![student])?
            .pop()
            .ok_or_else(|| AppError::internal("student row vanished while loading enrollments"))
    }
}

fn group(rows: Vec<CourseStudent>, key: impl Fn(&CourseStudent) -> (i32, i32)) -> HashMap<i32, Vec<i32>> {
    let mut grouped: HashMap<i32, Vec<i32>> = HashMap::new();
    for row in &rows {
        let (owner, member) = key(row);
        grouped.entry(owner).or_default().push(member);
    }
    grouped
}

impl EnrollmentCounter for PgStore {
    fn count_enrollments(&self, course_name: &str, exclude_course: Option<i32>) -> AppResult<i64> {
        let mut conn = self.pool.get()?;
        Ok(CourseRepo::count_enrollments(&mut conn, course_name, exclude_course)?)
    }
}

impl CourseStore for PgStore {
    fn list_courses(&self, filter: &CourseFilter) -> AppResult<Vec<CourseRecord>> {
        let mut conn = self.pool.get()?;
        let rows = CourseRepo::list(&mut conn, filter)?;
        Self::course_records(&mut conn, rows)
    }

    fn get_course(&self, course_id: i32) -> AppResult<Option<CourseRecord>> {
        let mut conn = self.pool.get()?;
        match CourseRepo::find_by_id(&mut conn, course_id)? {
            Some(course) => Self::single_course(&mut conn, course).map(Some),
            None => Ok(None),
        }
    }

    fn create_course(&self, name: &str, students: &[i32]) -> AppResult<CourseRecord> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, AppError, _>(|conn| {
            let course = CourseRepo::insert(conn, &NewCourse { name })?;
            CourseRepo::set_students(conn, course.id, students)?;
            Self::single_course(conn, course)
        })
    }

    fn update_course(
        &self,
        course_id: i32,
        name: Option<&str>,
        students: Option<&[i32]>,
    ) -> AppResult<Option<CourseRecord>> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, AppError, _>(|conn| {
            let Some(mut course) = CourseRepo::find_by_id(conn, course_id)? else {
                return Ok(None);
            };
            if let Some(new_name) = name {
                course = CourseRepo::rename(conn, course_id, new_name)?;
            }
            if let Some(student_ids) = students {
                CourseRepo::set_students(conn, course_id, student_ids)?;
            }
            Self::single_course(conn, course).map(Some)
        })
    }

    fn delete_course(&self, course_id: i32) -> AppResult<bool> {
        let mut conn = self.pool.get()?;
        Ok(CourseRepo::delete_by_id(&mut conn, course_id)? > 0)
    }

    fn missing_students(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get()?;
        let existing = StudentRepo::existing_ids(&mut conn, ids)?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !existing.contains(id))
            .collect())
    }

    fn list_students(&self, filter: &StudentFilter) -> AppResult<Vec<StudentRecord>> {
        let mut conn = self.pool.get()?;
        let rows = StudentRepo::list(&mut conn, filter)?;
        Self::student_records(&mut conn, rows)
    }

    fn get_student(&self, student_id: i32) -> AppResult<Option<StudentRecord>> {
        let mut conn = self.pool.get()?;
        match StudentRepo::find_by_id(&mut conn, student_id)? {
            Some(student) => Self::single_student(&mut conn, student).map(Some),
            None => Ok(None),
        }
    }

    fn create_student(&self, new_student: &NewStudent) -> AppResult<StudentRecord> {
        let mut conn = self.pool.get()?;
        let student = StudentRepo::insert(&mut conn, new_student)?;
        Ok(StudentRecord::from_row(student, Vec::new()))
    }

    fn update_student(
        &self,
        student_id: i32,
        changes: &StudentChanges,
    ) -> AppResult<Option<StudentRecord>> {
        let mut conn = self.pool.get()?;
        match StudentRepo::update_fields(&mut conn, student_id, changes)? {
            Some(student) => Self::single_student(&mut conn, student).map(Some),
            None => Ok(None),
        }
    }

    fn delete_student(&self, student_id: i32) -> AppResult<bool> {
        let mut conn = self.pool.get()?;
        Ok(StudentRepo::delete_by_id(&mut conn, student_id)? > 0)
    }
}
