use axum::extract::{Path, State};
use tracing::instrument;

use campus_core::{AppError, ApiResponse};

use crate::crud::controller::{INVALID_ID, path_id};
use crate::middleware::auth::AuthUser;
use crate::modules::students::model::{StudentBatch, StudentSubject, StudentUnit};
use crate::modules::students::service::StudentPortalService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/student/batch",
    responses(
        (status = 200, description = "The student's batch with accessible semesters and subjects", body = StudentBatch),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Student",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_batch(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<StudentBatch>, AppError> {
    Ok(match StudentPortalService::batch_of(&state.db, auth_user.id()).await? {
        Some(batch) => ApiResponse::success(batch),
        None => ApiResponse::notice("Batch Does Not Exist."),
    })
}

#[utoipa::path(
    get,
    path = "/api/student/subject/{subjectId}",
    params(("subjectId" = i64, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject with its units, when accessible", body = StudentSubject),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Student",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<ApiResponse<StudentSubject>, AppError> {
    let Some(subject_id) = path_id(&raw_id) else {
        return Ok(ApiResponse::notice(INVALID_ID));
    };

    Ok(
        match StudentPortalService::subject_for(&state.db, auth_user.id(), subject_id).await? {
            Some(subject) => ApiResponse::success(subject),
            None => ApiResponse::notice("Subject Does Not Exist."),
        },
    )
}

#[utoipa::path(
    get,
    path = "/api/student/unit/{unitId}",
    params(("unitId" = i64, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "Unit with active materials and quizzes, when accessible", body = StudentUnit),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Student",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_unit(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<ApiResponse<StudentUnit>, AppError> {
    let Some(unit_id) = path_id(&raw_id) else {
        return Ok(ApiResponse::notice(INVALID_ID));
    };

    Ok(
        match StudentPortalService::unit_for(&state.db, auth_user.id(), unit_id).await? {
            Some(unit) => ApiResponse::success(unit),
            None => ApiResponse::notice("Unit Does Not Exist."),
        },
    )
}
