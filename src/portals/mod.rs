//! Per-portal routers.
//!
//! Each portal is mounted under `/api/{portal}`. Its `/auth` routes are
//! public; everything else sits behind the portal's role middleware.

pub mod admin;
pub mod student;
pub mod teacher;

pub use admin::init_admin_router;
pub use student::init_student_router;
pub use teacher::init_teacher_router;
