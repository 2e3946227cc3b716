pub mod controller;
pub mod model;
pub mod resource;
pub mod service;

pub use model::*;
pub use resource::Students;
