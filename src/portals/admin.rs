use axum::{
    Router, middleware,
    routing::{get, post},
};

use campus_auth::PortalRole;

use crate::crud::{CrudRoutes, Ops};
use crate::middleware::role::require_admin;
use crate::modules::auth::{controller::admin_details, init_auth_router};
use crate::modules::batches::{Batches, Divisions};
use crate::modules::courses::{Courses, StudentDocuments};
use crate::modules::events::{Events, controller::set_event_approval};
use crate::modules::semesters::Semesters;
use crate::modules::students::Students;
use crate::modules::subjects::{SubjectTypes, Subjects};
use crate::modules::teachers::controller::{
    get_division_subject_teachers, save_division_subject_teacher,
};
use crate::modules::teachers::{TeacherRoles, Teachers};
use crate::modules::units::{UnitMaterials, UnitQuizzes, Units};
use crate::state::AppState;

pub fn init_admin_router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/details", get(admin_details))
        .merge(CrudRoutes::<Courses>::new("/courses", "/course").into_router())
        .merge(CrudRoutes::<Semesters>::new("/semesters", "/semester").into_router())
        .merge(CrudRoutes::<Subjects>::new("/subjects", "/subject").into_router())
        .merge(
            CrudRoutes::<SubjectTypes>::new("/subject-types", "/subject-type")
                .ops(Ops::LIST)
                .into_router(),
        )
        .merge(CrudRoutes::<Units>::new("/units", "/unit").into_router())
        .merge(CrudRoutes::<UnitMaterials>::new("/unit-material", "/unit-material").into_router())
        .merge(CrudRoutes::<UnitQuizzes>::new("/unit-quiz", "/unit-quiz").into_router())
        .merge(CrudRoutes::<Batches>::new("/batch", "/batch").into_router())
        .merge(CrudRoutes::<Divisions>::new("/divisions", "/division").into_router())
        .merge(CrudRoutes::<Teachers>::new("/teachers", "/teacher").into_router())
        .route(
            "/division-subject-teachers",
            get(get_division_subject_teachers).post(save_division_subject_teacher),
        )
        .merge(CrudRoutes::<Students>::new("/students", "/student").into_router())
        .merge(
            CrudRoutes::<Events>::new("/events", "/event")
                .ops(Ops::READ)
                .into_router(),
        )
        .route("/event", post(set_event_approval))
        .merge(CrudRoutes::<TeacherRoles>::new("/teacher-roles", "/teacher-role").into_router())
        .merge(
            CrudRoutes::<StudentDocuments>::new("/student-documents", "/student-document")
                .into_router(),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .nest(
            "/auth",
            init_auth_router(PortalRole::Admin, &state.rate_limit_config),
        )
        .merge(protected)
}
