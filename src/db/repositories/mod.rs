pub mod courses;
pub mod students;

pub use courses::CourseRepo;
pub use students::StudentRepo;
