//! # Campus API
//!
//! A REST backend for running an academic institution, split into three
//! portals that share one PostgreSQL database:
//!
//! - **Admin** (`/api/admin`): curriculum (courses, semesters, subjects,
//!   units with materials and quizzes), cohorts (batches and divisions),
//!   teachers, students, teacher roles, required student documents and event
//!   approval
//! - **Teacher** (`/api/teacher`): read access to the curriculum, full
//!   control over units, assignments scoped to the signed-in teacher, and
//!   events (create, organise, participate)
//! - **Student** (`/api/student`): the student's batch, and the subjects and
//!   units their batch has access to
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── config/       # Re-exported configuration (JWT, CORS, rate limiting)
//! ├── crud/         # Generic list/get/save/delete over a `Resource`
//! ├── middleware/   # Bearer token and per-portal role checks
//! ├── modules/      # Feature modules (resources, services, handlers)
//! ├── portals/      # Route tables for each portal
//! └── router.rs     # Top-level router, docs, CORS and request logging
//! ```
//!
//! Most entities are plain tables and are described once as a
//! [`crud::Resource`]; [`crud::CrudRoutes`] mounts them on a portal with the
//! operations that portal is allowed. Anything that does not fit the shape
//! (event membership, division subject teachers, the student views) has its
//! own `service.rs` and `controller.rs` in the feature module.
//!
//! ## Responses
//!
//! Every endpoint answers with the envelope
//! `{status, data, message, apiVersion}`. Business rejections (validation,
//! missing scope parameters, duplicates) are HTTP 200 with `status: false`;
//! authentication failures are 401; unexpected failures are 500 with the
//! generic message `"Error"`.
//!
//! ## Authentication
//!
//! Each portal has `POST /auth/login` and `POST /auth/access-token`. A token
//! is bound to the portal that issued it, so a teacher's token is refused by
//! the admin portal with "No Such User".
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod config;
pub mod crud;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod portals;
pub mod router;
pub mod state;
pub mod validator;

pub use campus_auth;
pub use campus_config;
pub use campus_core;
pub use campus_db;
