use diesel::prelude::*;

use crate::db::models::course::CourseStudent;
use crate::db::models::student::{NewStudent, Student, StudentChanges, StudentFilter};

pub struct StudentRepo;

impl StudentRepo {
    pub fn list(
        conn: &mut PgConnection,
        filter: &StudentFilter,
    ) -> Result<Vec<Student>, diesel::result::Error> {
        use crate::schema::students::dsl::*;
        let mut query = students.into_boxed();
        if let Some(student_id) = filter.id {
            query = query.filter(id.eq(student_id));
        }
        if let Some(student_name) = filter.name.as_deref() {
            query = query.filter(name.eq(student_name));
        }
        query
            .order(id.asc())
            .select(Student::as_select())
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        student_id: i32,
    ) -> Result<Option<Student>, diesel::result::Error> {
        use crate::schema::students::dsl::*;
        students
            .filter(id.eq(student_id))
            .select(Student::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_student: &NewStudent,
    ) -> Result<Student, diesel::result::Error> {
        diesel::insert_into(crate::schema::students::table)
            .values(new_student)
            .returning(Student::as_returning())
            .get_result(conn)
    }

    pub fn update_fields(
        conn: &mut PgConnection,
        student_id: i32,
        changes: &StudentChanges,
    ) -> Result<Option<Student>, diesel::result::Error> {
        // diesel rejects an empty changeset
        if changes.is_empty() {
            return Self::find_by_id(conn, student_id);
        }
        use crate::schema::students::dsl::*;
        diesel::update(students.filter(id.eq(student_id)))
            .set(changes)
            .returning(Student::as_returning())
            .get_result(conn)
            .optional()
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        student_id: i32,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::students::dsl::*;
        diesel::delete(students.filter(id.eq(student_id))).execute(conn)
    }

    pub fn existing_ids(
        conn: &mut PgConnection,
        ids: &[i32],
    ) -> Result<Vec<i32>, diesel::result::Error> {
        use crate::schema::students::dsl::*;
        students.filter(id.eq_any(ids)).select(id).load(conn)
    }

    /// Association rows for the given students, ordered by student then course.
    pub fn enrollments_for(
        conn: &mut PgConnection,
        student_ids: &[i32],
    ) -> Result<Vec<CourseStudent>, diesel::result::Error> {
        use crate::schema::courses_students::dsl::*;
        courses_students
            .filter(student_id.eq_any(student_ids))
            .order((student_id.asc(), course_id.asc()))
            .select(CourseStudent::as_select())
            .load(conn)
    }
}
