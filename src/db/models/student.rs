use diesel::prelude::*;
use serde::{Deserialize, Serialize};

// Student models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub birth_date: Option<chrono::NaiveDate>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::students)]
pub struct NewStudent {
    pub name: String,
    pub birth_date: Option<chrono::NaiveDate>,
}

/// Column changes for a student update. `birth_date: Some(None)` clears the
/// stored date; `None` leaves it untouched.
#[derive(AsChangeset, Default, Clone, Debug)]
#[diesel(table_name = crate::schema::students)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub birth_date: Option<Option<chrono::NaiveDate>>,
}

impl StudentChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.birth_date.is_none()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StudentRecord {
    pub id: i32,
    pub name: String,
    pub birth_date: Option<chrono::NaiveDate>,
    pub courses: Vec<i32>,
}

impl StudentRecord {
    pub fn from_row(student: Student, courses: Vec<i32>) -> Self {
        Self {
            id: student.id,
            name: student.name,
            birth_date: student.birth_date,
            courses,
        }
    }
}

#[derive(Deserialize, Default, Clone, Debug)]
pub struct StudentFilter {
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub id: Option<i32>,
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub name: Option<String>,
}

impl StudentFilter {
    pub fn matches(&self, id: i32, name: &str) -> bool {
        self.id.map_or(true, |wanted| wanted == id)
            && self.name.as_deref().map_or(true, |wanted| wanted == name)
    }
}
