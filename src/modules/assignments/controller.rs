use axum::extract::{Path, State};
use tracing::instrument;

use campus_core::{AppError, ApiResponse};

use crate::crud::Resource;
use crate::crud::controller::{INVALID_ID, path_id};
use crate::middleware::auth::AuthUser;
use crate::modules::assignments::model::{AssignmentStudent, SubmittedAssignment};
use crate::modules::assignments::resource::Assignments;
use crate::modules::assignments::service::SubmissionService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/teacher/students-by-assignment/{assignmentId}",
    params(("assignmentId" = i64, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Students of the assignment's division with their submissions", body = Vec<AssignmentStudent>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_students_by_assignment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<ApiResponse<Vec<AssignmentStudent>>, AppError> {
    let Some(assignment_id) = path_id(&raw_id) else {
        return Ok(ApiResponse::notice(INVALID_ID));
    };

    let students =
        SubmissionService::students_by_assignment(&state.db, auth_user.id(), assignment_id)
            .await?;

    Ok(match students {
        Some(students) => ApiResponse::success(students),
        None => ApiResponse::notice(Assignments::not_found_message()),
    })
}

#[utoipa::path(
    get,
    path = "/api/teacher/submitted-assignment/{submittedAssignmentId}",
    params(("submittedAssignmentId" = i64, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "One submission of the teacher's assignment", body = SubmittedAssignment),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_submitted_assignment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<ApiResponse<SubmittedAssignment>, AppError> {
    let Some(id) = path_id(&raw_id) else {
        return Ok(ApiResponse::notice(INVALID_ID));
    };

    Ok(
        match SubmissionService::submitted_assignment(&state.db, auth_user.id(), id).await? {
            Some(submission) => ApiResponse::success(submission),
            None => ApiResponse::notice("Submitted Assignment Does Not Exist."),
        },
    )
}
