pub mod assignments;
pub mod auth;
pub mod batches;
pub mod courses;
pub mod events;
pub mod semesters;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod units;
