//! Request authentication.
//!
//! - [`role`]: the per-portal middleware that verifies the bearer token and
//!   loads the principal
//! - [`auth`]: the [`auth::AuthUser`] extractor that hands the principal to
//!   handlers
//!
//! ```ignore
//! Router::new()
//!     .route("/details", get(get_details))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

pub mod auth;
pub mod role;
