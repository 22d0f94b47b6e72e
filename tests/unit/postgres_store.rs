use course_backend::config::DatabaseConfig;
use course_backend::db::create_pool;
use course_backend::db::models::{CourseFilter, NewStudent};
use course_backend::store::{CourseStore, EnrollmentCounter, PgStore};

fn store() -> PgStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a migrated database");
    let pool = create_pool(&DatabaseConfig {
        url,
        max_connections: 2,
        min_connections: 1,
        connection_timeout: 5,
    })
    .expect("Failed to create pool");
    PgStore::new(pool)
}

#[test]
#[ignore = "requires postgres"]
fn test_course_lifecycle_and_enrollment_count() {
    let store = store();
    let name = format!("pg-course-{}", uuid::Uuid::new_v4());

    let a = store
        .create_student(&NewStudent {
            name: "Ada".to_string(),
            birth_date: None,
        })
        .unwrap();
    let b = store
        .create_student(&NewStudent {
            name: "Brian".to_string(),
            birth_date: None,
        })
        .unwrap();

    let course = store.create_course(&name, &[b.id, a.id]).unwrap();
    assert_eq!(course.students, vec![a.id, b.id]);
    assert_eq!(store.count_enrollments(&name, None).unwrap(), 2);
    assert_eq!(store.count_enrollments(&name, Some(course.id)).unwrap(), 0);

    let listed = store
        .list_courses(&CourseFilter {
            id: None,
            name: Some(name.clone()),
        })
        .unwrap();
    assert_eq!(listed, vec![course.clone()]);

    let updated = store
        .update_course(course.id, None, Some(&[a.id][..]))
        .unwrap()
        .unwrap();
    assert_eq!(updated.students, vec![a.id]);
    assert_eq!(store.get_student(a.id).unwrap().unwrap().courses, vec![course.id]);

    assert!(store.delete_course(course.id).unwrap());
    assert_eq!(store.count_enrollments(&name, None).unwrap(), 0);
    assert!(store.delete_student(a.id).unwrap());
    assert!(store.delete_student(b.id).unwrap());
    assert_eq!(store.missing_students(&[a.id]).unwrap(), vec![a.id]);
}
