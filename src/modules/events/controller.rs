use axum::extract::{Path, State};
use tracing::instrument;

use campus_core::{AppError, ApiResponse};

use crate::crud::Resource;
use crate::crud::controller::{INVALID_ID, path_id};
use crate::middleware::auth::AuthUser;
use crate::modules::events::model::{EventApprovalDto, JoinEventDto, OrganiserApprovalDto};
use crate::modules::events::resource::Events;
use crate::modules::events::service::{EventService, Found};
use crate::state::AppState;
use crate::validator::ValidatedJson;

fn respond(found: Found, message: &str) -> ApiResponse<()> {
    match found {
        Found::Yes => ApiResponse::notice(message),
        Found::No => ApiResponse::notice(Events::not_found_message()),
    }
}

#[utoipa::path(
    post,
    path = "/api/admin/event",
    request_body = EventApprovalDto,
    responses(
        (status = 200, description = "Approval status saved"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn set_event_approval(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<EventApprovalDto>,
) -> Result<ApiResponse<()>, AppError> {
    let found = EventService::set_approval(&state.db, dto.event_id, dto.approval_status).await?;
    Ok(respond(found, &Events::saved_message()))
}

#[utoipa::path(
    post,
    path = "/api/teacher/join-event-organisers",
    request_body = JoinEventDto,
    responses(
        (status = 200, description = "Organiser request recorded"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn join_event_organisers(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<JoinEventDto>,
) -> Result<ApiResponse<()>, AppError> {
    let found = EventService::join_organisers(&state.db, auth_user.id(), dto.event_id).await?;
    Ok(respond(found, "Organiser Request Sent."))
}

#[utoipa::path(
    post,
    path = "/api/teacher/join-event-participants",
    request_body = JoinEventDto,
    responses(
        (status = 200, description = "Joined the event"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn join_event_participants(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<JoinEventDto>,
) -> Result<ApiResponse<()>, AppError> {
    let found = EventService::join_participants(&state.db, auth_user.id(), dto.event_id).await?;
    Ok(respond(found, "Event Joined."))
}

#[utoipa::path(
    delete,
    path = "/api/teacher/remove-event-participant/{eventParticipantId}",
    params(("eventParticipantId" = i64, Path, description = "Event participant ID")),
    responses(
        (status = 200, description = "Participant removed"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn remove_event_participant(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    let Some(participant_id) = path_id(&raw_id) else {
        return Ok(ApiResponse::notice(INVALID_ID));
    };

    let found = EventService::remove_participant(&state.db, auth_user.id(), participant_id).await?;
    Ok(match found {
        Found::Yes => ApiResponse::notice("Event Participant Removed."),
        Found::No => ApiResponse::notice("Event Participant Does Not Exist."),
    })
}

#[utoipa::path(
    post,
    path = "/api/teacher/event-organisers-approval-status",
    request_body = OrganiserApprovalDto,
    responses(
        (status = 200, description = "Organiser approval saved, or rejected when not the event head"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn set_event_organiser_approval(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<OrganiserApprovalDto>,
) -> Result<ApiResponse<()>, AppError> {
    let found = EventService::set_organiser_approval(
        &state.db,
        auth_user.id(),
        dto.event_organiser_id,
        dto.approval_status,
    )
    .await?;

    Ok(match found {
        Found::Yes => ApiResponse::notice("Event Organiser Saved."),
        Found::No => ApiResponse::notice("Event Organiser Does Not Exist."),
    })
}
