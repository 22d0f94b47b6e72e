use diesel::prelude::*;
use serde::{Deserialize, Serialize};

// Course models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Course {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::courses)]
pub struct NewCourse<'a> {
    pub name: &'a str,
}

#[derive(Queryable, Selectable, Insertable, Clone, Copy, Debug, PartialEq, Eq)]
#[diesel(table_name = crate::schema::courses_students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CourseStudent {
    pub course_id: i32,
    pub student_id: i32,
}

/// A course together with the ids of its enrolled students, in the shape
/// the API returns it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CourseRecord {
    pub id: i32,
    pub name: String,
    pub students: Vec<i32>,
}

impl CourseRecord {
    pub fn from_row(course: Course, students: Vec<i32>) -> Self {
        Self {
            id: course.id,
            name: course.name,
            students,
        }
    }
}

/// Exact-match filters accepted by the course list endpoint.
#[derive(Deserialize, Default, Clone, Debug)]
pub struct CourseFilter {
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub id: Option<i32>,
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub name: Option<String>,
}

impl CourseFilter {
    pub fn matches(&self, id: i32, name: &str) -> bool {
        self.id.map_or(true, |wanted| wanted == id)
            && self.name.as_deref().map_or(true, |wanted| wanted == name)
    }
}
