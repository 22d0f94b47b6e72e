pub mod courses_service;
pub mod students_service;

pub use courses_service::CoursesService;
pub use students_service::StudentsService;
