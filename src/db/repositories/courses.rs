use diesel::prelude::*;

use crate::db::models::course::{Course, CourseFilter, CourseStudent, NewCourse};

pub struct CourseRepo;

impl CourseRepo {
    pub fn list(
        conn: &mut PgConnection,
        filter: &CourseFilter,
    ) -> Result<Vec<Course>, diesel::result::Error> {
        use crate::schema::courses::dsl::*;
        let mut query = courses.into_boxed();
        if let Some(course_id) = filter.id {
            query = query.filter(id.eq(course_id));
        }
        if let Some(course_name) = filter.name.as_deref() {
            query = query.filter(name.eq(course_name));
        }
        query
            .order(id.asc())
            .select(Course::as_select())
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        course_id: i32,
    ) -> Result<Option<Course>, diesel::result::Error> {
        use crate::schema::courses::dsl::*;
        courses
            .filter(id.eq(course_id))
            .select(Course::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_course: &NewCourse,
    ) -> Result<Course, diesel::result::Error> {
        diesel::insert_into(crate::schema::courses::table)
            .values(new_course)
            .returning(Course::as_returning())
            .get_result(conn)
    }

    pub fn rename(
        conn: &mut PgConnection,
        course_id: i32,
        new_name: &str,
    ) -> Result<Course, diesel::result::Error> {
        use crate::schema::courses::dsl::*;
        diesel::update(courses.filter(id.eq(course_id)))
            .set(name.eq(new_name))
            .returning(Course::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        course_id: i32,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::courses::dsl::*;
        diesel::delete(courses.filter(id.eq(course_id))).execute(conn)
    }

    /// Association rows for the given courses, ordered by course then student.
    pub fn enrollments_for(
        conn: &mut PgConnection,
        course_ids: &[i32],
    ) -> Result<Vec<CourseStudent>, diesel::result::Error> {
        use crate::schema::courses_students::dsl::*;
        courses_students
            .filter(course_id.eq_any(course_ids))
            .order((course_id.asc(), student_id.asc()))
            .select(CourseStudent::as_select())
            .load(conn)
    }

    /// Replace the student set of a course.
    pub fn set_students(
        conn: &mut PgConnection,
        course_id_val: i32,
        student_ids: &[i32],
    ) -> Result<(), diesel::result::Error> {
        use crate::schema::courses_students::dsl as cs;
        diesel::delete(cs::courses_students.filter(cs::course_id.eq(course_id_val))).execute(conn)?;
        if student_ids.is_empty() {
            return Ok(());
        }
        let rows: Vec<CourseStudent> = student_ids
            .iter()
            .map(|sid| CourseStudent {
                course_id: course_id_val,
                student_id: *sid,
            })
            .collect();
        diesel::insert_into(cs::courses_students)
            .values(&rows)
            .execute(conn)?;
        Ok(())
    }

    /// Number of association rows whose course carries `course_name`.
    pub fn count_enrollments(
        conn: &mut PgConnection,
        course_name: &str,
        exclude_course: Option<i32>,
    ) -> Result<i64, diesel::result::Error> {
        use crate::schema::{courses, courses_students};
        let mut query = courses_students::table
            .inner_join(courses::table)
            .filter(courses::name.eq(course_name))
            .into_boxed();
        if let Some(excluded) = exclude_course {
            query = query.filter(courses::id.ne(excluded));
        }
        query.count().get_result(conn)
    }
}
