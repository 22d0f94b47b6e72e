mod courses;
mod enrollment;
mod postgres_store;
