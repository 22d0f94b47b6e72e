// Request DTO validation; no server needed

use course_backend::routes::courses::{CourseRequest, PatchCourseRequest};
use course_backend::routes::students::PatchStudentRequest;
use validator::Validate;

#[test]
fn course_request_rules() {
    let ok: CourseRequest = serde_json::from_str(r#"{"name": "Rust 101", "students": [1, 2]}"#).unwrap();
    assert!(ok.validate().is_ok());

    let no_students: CourseRequest = serde_json::from_str(r#"{"name": "Rust 101"}"#).unwrap();
    assert!(no_students.students.is_none());

    let blank: CourseRequest = serde_json::from_str(r#"{"name": " "}"#).unwrap();
    assert!(blank.validate().is_err());

    let too_long = CourseRequest {
        name: "x".repeat(257),
        students: None,
    };
    assert!(too_long.validate().is_err());

    let bad_ids: CourseRequest = serde_json::from_str(r#"{"name": "Rust", "students": [0]}"#).unwrap();
    assert!(bad_ids.validate().is_err());
}

#[test]
fn patch_course_request_fields_are_optional() {
    let empty: PatchCourseRequest = serde_json::from_str("{}").unwrap();
    assert!(empty.validate().is_ok());
    assert!(empty.name.is_none() && empty.students.is_none());

    let blank: PatchCourseRequest = serde_json::from_str(r#"{"name": ""}"#).unwrap();
    assert!(blank.validate().is_err());
}

#[test]
fn patch_student_distinguishes_null_from_missing() {
    let missing: PatchStudentRequest = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
    assert_eq!(missing.birth_date, None);

    let null: PatchStudentRequest = serde_json::from_str(r#"{"birth_date": null}"#).unwrap();
    assert_eq!(null.birth_date, Some(None));

    let set: PatchStudentRequest = serde_json::from_str(r#"{"birth_date": "2000-02-29"}"#).unwrap();
    assert_eq!(set.birth_date, Some(chrono::NaiveDate::from_ymd_opt(2000, 2, 29)));
}
