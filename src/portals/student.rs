use axum::{Router, middleware, routing::get};

use campus_auth::PortalRole;

use crate::middleware::role::require_student;
use crate::modules::auth::{controller::student_details, init_auth_router};
use crate::modules::students::controller::{get_student_batch, get_student_subject, get_student_unit};
use crate::state::AppState;

pub fn init_student_router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/details", get(student_details))
        .route("/batch", get(get_student_batch))
        .route("/subject/{subject_id}", get(get_student_subject))
        .route("/unit/{unit_id}", get(get_student_unit))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_student));

    Router::new()
        .nest(
            "/auth",
            init_auth_router(PortalRole::Student, &state.rate_limit_config),
        )
        .merge(protected)
}
