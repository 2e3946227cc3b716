use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use campus_auth::PortalRole;

use crate::crud::{CrudRoutes, Ops};
use crate::middleware::role::require_teacher;
use crate::modules::assignments::Assignments;
use crate::modules::assignments::controller::{
    get_students_by_assignment, get_submitted_assignment,
};
use crate::modules::auth::{controller::teacher_details, init_auth_router};
use crate::modules::batches::{Batches, Divisions};
use crate::modules::courses::Courses;
use crate::modules::events::Events;
use crate::modules::events::controller::{
    join_event_organisers, join_event_participants, remove_event_participant,
    set_event_organiser_approval,
};
use crate::modules::semesters::Semesters;
use crate::modules::students::Students;
use crate::modules::subjects::{SubjectTypes, Subjects};
use crate::modules::teachers::Teachers;
use crate::modules::teachers::controller::{
    get_teacher_divisions, get_teacher_subjects_by_division,
};
use crate::modules::units::{UnitMaterials, UnitQuizzes, Units};
use crate::state::AppState;

pub fn init_teacher_router(state: &AppState) -> Router<AppState> {
    let curriculum = Router::new()
        .merge(
            CrudRoutes::<Courses>::new("/courses", "/course")
                .ops(Ops::READ)
                .into_router(),
        )
        .merge(
            CrudRoutes::<Semesters>::new("/semesters", "/semester")
                .ops(Ops::READ)
                .into_router(),
        )
        .merge(
            CrudRoutes::<Subjects>::new("/subjects", "/subject")
                .ops(Ops::READ)
                .into_router(),
        )
        .merge(
            CrudRoutes::<SubjectTypes>::new("/subject-types", "/subject-type")
                .ops(Ops::LIST)
                .into_router(),
        )
        .merge(
            CrudRoutes::<Batches>::new("/batches", "/batch")
                .ops(Ops::READ)
                .into_router(),
        )
        .merge(
            CrudRoutes::<Divisions>::new("/divisions", "/division")
                .ops(Ops::READ)
                .into_router(),
        )
        .merge(CrudRoutes::<Units>::new("/units", "/unit").into_router())
        .merge(CrudRoutes::<UnitMaterials>::new("/unit-material", "/unit-material").into_router())
        .merge(CrudRoutes::<UnitQuizzes>::new("/unit-quiz", "/unit-quiz").into_router());

    let people = Router::new()
        .merge(
            CrudRoutes::<Teachers>::new("/teachers", "/teacher")
                .ops(Ops::READ_SAVE)
                .into_router(),
        )
        .route("/teacher-divisions", get(get_teacher_divisions))
        .route(
            "/teacher-subjects-by-division",
            get(get_teacher_subjects_by_division),
        )
        .merge(
            CrudRoutes::<Students>::new("/students", "/student")
                .ops(Ops::READ)
                .into_router(),
        );

    let coursework = Router::new()
        .merge(CrudRoutes::<Assignments>::new("/assignments", "/assignment").into_router())
        .route(
            "/students-by-assignment/{assignment_id}",
            get(get_students_by_assignment),
        )
        .route(
            "/submitted-assignment/{submitted_assignment_id}",
            get(get_submitted_assignment),
        );

    let events = Router::new()
        .merge(CrudRoutes::<Events>::new("/events", "/event").into_router())
        .route("/join-event-organisers", post(join_event_organisers))
        .route("/join-event-participants", post(join_event_participants))
        .route(
            "/remove-event-participant/{event_participant_id}",
            delete(remove_event_participant),
        )
        .route(
            "/event-organisers-approval-status",
            post(set_event_organiser_approval),
        );

    let protected = Router::new()
        .route("/details", get(teacher_details))
        .merge(curriculum)
        .merge(people)
        .merge(coursework)
        .merge(events)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_teacher));

    Router::new()
        .nest(
            "/auth",
            init_auth_router(PortalRole::Teacher, &state.rate_limit_config),
        )
        .merge(protected)
}
