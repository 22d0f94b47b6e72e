use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use super::{CourseStore, EnrollmentCounter};
use crate::db::models::{
    CourseFilter, CourseRecord, NewStudent, Student, StudentChanges, StudentFilter, StudentRecord,
};
use crate::error::{AppError, AppResult};

#[derive(Default)]
struct Inner {
    courses: BTreeMap<i32, String>,
    students: BTreeMap<i32, Student>,
    // (course_id, student_id)
    enrollments: BTreeSet<(i32, i32)>,
    last_course_id: i32,
    last_student_id: i32,
}

impl Inner {
    fn course_record(&self, course_id: i32, name: &str) -> CourseRecord {
        let students = self
            .enrollments
            .range((course_id, i32::MIN)..=(course_id, i32::MAX))
            .map(|(_, student_id)| *student_id)
            .collect();
        CourseRecord {
            id: course_id,
            name: name.to_string(),
            students,
        }
    }

    fn student_record(&self, student: &Student) -> StudentRecord {
        let courses = self
            .enrollments
            .iter()
            .filter(|(_, student_id)| *student_id == student.id)
            .map(|(course_id, _)| *course_id)
            .collect();
        StudentRecord::from_row(student.clone(), courses)
    }

    fn set_students(&mut self, course_id: i32, students: &[i32]) {
        self.enrollments.retain(|(cid, _)| *cid != course_id);
        self.enrollments
            .extend(students.iter().map(|student_id| (course_id, *student_id)));
    }
}

/// Process-local store; ids start at 1 and are never reused, like a SERIAL
/// column.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| AppError::internal("in-memory store lock poisoned"))
    }
}

impl EnrollmentCounter for MemoryStore {
    fn count_enrollments(&self, course_name: &str, exclude_course: Option<i32>) -> AppResult<i64> {
        let inner = self.lock()?;
        let count = inner
            .enrollments
            .iter()
            .filter(|(course_id, _)| Some(*course_id) != exclude_course)
            .filter(|(course_id, _)| {
                inner
                    .courses
                    .get(course_id)
                    .is_some_and(|name| name == course_name)
            })
            .count();
        Ok(count as i64)
    }
}

impl CourseStore for MemoryStore {
    fn list_courses(&self, filter: &CourseFilter) -> AppResult<Vec<CourseRecord>> {
        let inner = self.lock()?;
        Ok(inner
            .courses
            .iter()
            .filter(|(id, name)| filter.matches(**id, name))
            .map(|(id, name)| inner.course_record(*id, name))
            .collect())
    }

    fn get_course(&self, course_id: i32) -> AppResult<Option<CourseRecord>> {
        let inner = self.lock()?;
        Ok(inner
            .courses
            .get(&course_id)
            .map(|name| inner.course_record(course_id, name)))
    }

    fn create_course(&self, name: &str, students: &[i32]) -> AppResult<CourseRecord> {
        let mut inner = self.lock()?;
        inner.last_course_id += 1;
        let course_id = inner.last_course_id;
        inner.courses.insert(course_id, name.to_string());
        inner.set_students(course_id, students);
        Ok(inner.course_record(course_id, name))
    }

    fn update_course(
        &self,
        course_id: i32,
        name: Option<&str>,
        students: Option<&[i32]>,
    ) -> AppResult<Option<CourseRecord>> {
        let mut inner = self.lock()?;
        let Some(current) = inner.courses.get(&course_id).cloned() else {
            return Ok(None);
        };
        let name = name.map(str::to_string).unwrap_or(current);
        inner.courses.insert(course_id, name.clone());
        if let Some(student_ids) = students {
            inner.set_students(course_id, student_ids);
        }
        Ok(Some(inner.course_record(course_id, &name)))
    }

    fn delete_course(&self, course_id: i32) -> AppResult<bool> {
        let mut inner = self.lock()?;
        if inner.courses.remove(&course_id).is_none() {
            return Ok(false);
        }
        inner.set_students(course_id, &[]);
        Ok(true)
    }

    fn missing_students(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        let inner = self.lock()?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !inner.students.contains_key(id))
            .collect())
    }

    fn list_students(&self, filter: &StudentFilter) -> AppResult<Vec<StudentRecord>> {
        let inner = self.lock()?;
        Ok(inner
            .students
            .values()
            .filter(|s| filter.matches(s.id, &s.name))
            .map(|s| inner.student_record(s))
            .collect())
    }

    fn get_student(&self, student_id: i32) -> AppResult<Option<StudentRecord>> {
        let inner = self.lock()?;
        Ok(inner
            .students
            .get(&student_id)
            .map(|s| inner.student_record(s)))
    }

    fn create_student(&self, new_student: &NewStudent) -> AppResult<StudentRecord> {
        let mut inner = self.lock()?;
        inner.last_student_id += 1;
        let student = Student {
            id: inner.last_student_id,
            name: new_student.name.clone(),
            birth_date: new_student.birth_date,
        };
        inner.students.insert(student.id, student.clone());
        Ok(StudentRecord::from_row(student, Vec::new()))
    }

    fn update_student(
        &self,
        student_id: i32,
        changes: &StudentChanges,
    ) -> AppResult<Option<StudentRecord>> {
        let mut inner = self.lock()?;
        let Some(student) = inner.students.get_mut(&student_id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            student.name = name.clone();
        }
        if let Some(birth_date) = changes.birth_date {
            student.birth_date = birth_date;
        }
        let student = student.clone();
        Ok(Some(inner.student_record(&student)))
    }

    fn delete_student(&self, student_id: i32) -> AppResult<bool> {
        let mut inner = self.lock()?;
        if inner.students.remove(&student_id).is_none() {
            return Ok(false);
        }
        inner.enrollments.retain(|(_, sid)| *sid != student_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for name in ["Ada", "Brian", "Cleo"] {
            store
                .create_student(&NewStudent {
                    name: name.to_string(),
                    birth_date: None,
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let store = seeded();
        let first = store.create_course("algebra", &[]).unwrap();
        let second = store.create_course("geometry", &[]).unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        store.delete_course(2).unwrap();
        let third = store.create_course("topology", &[]).unwrap();
        assert_eq!(third.id, 3);
    }

    #[test]
    fn test_count_enrollments_by_name() {
        let store = seeded();
        let a = store.create_course("algebra", &[1, 2]).unwrap();
        store.create_course("algebra", &[3]).unwrap();
        store.create_course("geometry", &[1, 2, 3]).unwrap();

        assert_eq!(store.count_enrollments("algebra", None).unwrap(), 3);
        assert_eq!(store.count_enrollments("algebra", Some(a.id)).unwrap(), 1);
        assert_eq!(store.count_enrollments("geometry", None).unwrap(), 3);
        assert_eq!(store.count_enrollments("calculus", None).unwrap(), 0);
    }

    #[test]
    fn test_update_keeps_students_when_omitted() {
        let store = seeded();
        let course = store.create_course("algebra", &[2, 1]).unwrap();
        assert_eq!(course.students, vec![1, 2]);

        let renamed = store
            .update_course(course.id, Some("linear algebra"), None)
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "linear algebra");
        assert_eq!(renamed.students, vec![1, 2]);

        let emptied = store.update_course(course.id, None, Some(&[][..])).unwrap().unwrap();
        assert!(emptied.students.is_empty());
        assert_eq!(emptied.name, "linear algebra");

        assert!(store.update_course(99, Some("x"), None).unwrap().is_none());
    }

    #[test]
    fn test_deletes_cascade_to_enrollments() {
        let store = seeded();
        let course = store.create_course("algebra", &[1, 2]).unwrap();
        assert!(store.delete_student(1).unwrap());
        assert_eq!(store.get_course(course.id).unwrap().unwrap().students, vec![2]);

        assert!(store.delete_course(course.id).unwrap());
        assert!(!store.delete_course(course.id).unwrap());
        assert!(store.get_student(2).unwrap().unwrap().courses.is_empty());
    }

    #[test]
    fn test_missing_students_preserves_order() {
        let store = seeded();
        assert_eq!(store.missing_students(&[9, 1, 7]).unwrap(), vec![9, 7]);
        assert!(store.missing_students(&[3, 2]).unwrap().is_empty());
    }

    #[test]
    fn test_list_filters() {
        let store = seeded();
        store.create_course("algebra", &[]).unwrap();
        store.create_course("geometry", &[]).unwrap();
        store.create_course("algebra", &[]).unwrap();

        let by_name = store
            .list_courses(&CourseFilter {
                id: None,
                name: Some("algebra".to_string()),
            })
            .unwrap();
        assert_eq!(by_name.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 3]);

        let by_id = store
            .list_courses(&CourseFilter {
                id: Some(2),
                name: None,
            })
            .unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].name, "geometry");
    }

    #[test]
    fn test_student_update_can_clear_birth_date() {
        let store = MemoryStore::new();
        let born = chrono::NaiveDate::from_ymd_opt(2000, 1, 31);
        let s = store
            .create_student(&NewStudent {
                name: "Ada".to_string(),
                birth_date: born,
            })
            .unwrap();
        assert_eq!(s.birth_date, born);

        let cleared = store
            .update_student(
                s.id,
                &StudentChanges {
                    name: None,
                    birth_date: Some(None),
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(cleared.birth_date, None);
        assert_eq!(cleared.name, "Ada");
    }
}
