// Cap rule against the in-memory store; the postgres store needs a database

use course_backend::db::models::NewStudent;
use course_backend::error::AppError;
use course_backend::store::{CourseStore, MemoryStore};
use course_backend::validation::enrollment::{
    CapPolicy, EnrollmentCap, EnrollmentCapValidator, Operation, ProposedCourse,
};
use tokio_test::{assert_err, assert_ok};

fn store_with_enrollments(course_name: &str, students: usize) -> MemoryStore {
    let store = MemoryStore::new();
    let ids: Vec<i32> = (0..students)
        .map(|i| {
            store
                .create_student(&NewStudent {
                    name: format!("student-{i}"),
                    birth_date: None,
                })
                .unwrap()
                .id
        })
        .collect();
    store.create_course(course_name, &ids).unwrap();
    store
}

fn existing(max_students: i64) -> EnrollmentCapValidator {
    EnrollmentCapValidator::new(EnrollmentCap {
        max_students,
        policy: CapPolicy::Existing,
    })
}

fn proposed(name: &str) -> ProposedCourse<'_> {
    ProposedCourse {
        name,
        course_id: None,
        students: 0,
    }
}

#[test]
fn writes_below_cap_succeed() {
    let store = store_with_enrollments("rust", 2);
    let validator = existing(3);
    for op in [Operation::Create, Operation::Replace, Operation::Patch] {
        assert_ok!(validator.validate(&store, &proposed("rust"), op));
    }
}

#[test]
fn writes_at_or_over_cap_fail() {
    for enrolled in [3, 4] {
        let store = store_with_enrollments("rust", enrolled);
        let validator = existing(3);
        for op in [Operation::Create, Operation::Replace, Operation::Patch] {
            let err = assert_err!(validator.validate(&store, &proposed("rust"), op));
            assert!(matches!(err, AppError::EnrollmentCap(ref e) if e.enrolled == enrolled as i64));
        }
    }
}

#[test]
fn reads_and_deletes_always_pass() {
    let store = store_with_enrollments("rust", 10);
    let validator = existing(1);
    assert_ok!(validator.validate(&store, &proposed("rust"), Operation::Read));
    assert_ok!(validator.validate(&store, &proposed("rust"), Operation::Delete));
}

#[test]
fn cap_error_message_names_course_and_limit() {
    let store = store_with_enrollments("rust", 1);
    let err = existing(1)
        .validate(&store, &proposed("rust"), Operation::Create)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Enrollment cap exceeded: course 'rust' has 1 student(s), the limit is 1"
    );
}
