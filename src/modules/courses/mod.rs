pub mod model;
pub mod resource;

pub use model::*;
pub use resource::{Courses, StudentDocuments};
