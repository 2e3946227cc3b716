use axum::extract::{Query, State};
use tracing::instrument;

use campus_core::normalize::int_or_none;
use campus_core::{AppError, ApiResponse};

use crate::middleware::auth::AuthUser;
use crate::modules::teachers::model::{
    DivisionQuery, DivisionSubjectTeachersResponse, SaveDivisionSubjectTeacherDto,
    TeacherDivision, TeacherSubject,
};
use crate::modules::teachers::service::DivisionSubjectTeacherService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

pub const SEND_DIVISION_ID: &str = "Send Division ID";

fn require_division(query: &DivisionQuery) -> Result<i64, AppError> {
    query
        .division_id
        .as_deref()
        .and_then(int_or_none)
        .ok_or_else(|| AppError::rejected(SEND_DIVISION_ID))
}

#[utoipa::path(
    get,
    path = "/api/admin/division-subject-teachers",
    params(DivisionQuery),
    responses(
        (status = 200, description = "Active subject teachers of the division", body = DivisionSubjectTeachersResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_division_subject_teachers(
    State(state): State<AppState>,
    Query(query): Query<DivisionQuery>,
) -> Result<ApiResponse<DivisionSubjectTeachersResponse>, AppError> {
    let division_id = require_division(&query)?;
    let division_subject_teachers =
        DivisionSubjectTeacherService::list_by_division(&state.db, division_id).await?;

    Ok(ApiResponse::success(DivisionSubjectTeachersResponse {
        division_subject_teachers,
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/division-subject-teachers",
    request_body = SaveDivisionSubjectTeacherDto,
    responses(
        (status = 200, description = "Assignment saved"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn save_division_subject_teacher(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SaveDivisionSubjectTeacherDto>,
) -> Result<ApiResponse<()>, AppError> {
    DivisionSubjectTeacherService::assign(&state.db, dto).await?;
    Ok(ApiResponse::notice("Division Subject Teacher Saved."))
}

#[utoipa::path(
    get,
    path = "/api/teacher/teacher-divisions",
    responses(
        (status = 200, description = "Divisions the teacher teaches in", body = Vec<TeacherDivision>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_teacher_divisions(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<Vec<TeacherDivision>>, AppError> {
    let divisions =
        DivisionSubjectTeacherService::divisions_of_teacher(&state.db, auth_user.id()).await?;
    Ok(ApiResponse::success(divisions))
}

#[utoipa::path(
    get,
    path = "/api/teacher/teacher-subjects-by-division",
    params(DivisionQuery),
    responses(
        (status = 200, description = "Subjects the teacher teaches in the division", body = Vec<TeacherSubject>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_teacher_subjects_by_division(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<DivisionQuery>,
) -> Result<ApiResponse<Vec<TeacherSubject>>, AppError> {
    let division_id = require_division(&query)?;
    let subjects =
        DivisionSubjectTeacherService::subjects_of_teacher(&state.db, auth_user.id(), division_id)
            .await?;
    Ok(ApiResponse::success(subjects))
}
