use axum::extract::{Path, Query, State};
use tracing::instrument;

use campus_core::normalize::int_or_none;
use campus_core::{AppError, ApiResponse};

use crate::crud::params::{ListParams, Listing, SavedId};
use crate::crud::resource::Resource;
use crate::crud::service::CrudService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

pub const INVALID_ID: &str = "Send A Valid ID";

/// Parses an id path segment; anything but a non-negative integer is `None`.
pub fn path_id(raw: &str) -> Option<i64> {
    int_or_none(raw)
}

#[instrument(skip_all, fields(resource = R::TABLE))]
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Query(params): Query<ListParams>,
) -> Result<ApiResponse<Listing<R::Row>>, AppError> {
    let listing = CrudService::<R>::list(&state.db, &params, &principal).await?;
    Ok(ApiResponse::success(listing))
}

#[instrument(skip_all, fields(resource = R::TABLE, id = %raw_id))]
pub async fn get_one<R: Resource>(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<ApiResponse<R::Row>, AppError> {
    let Some(id) = path_id(&raw_id) else {
        return Ok(ApiResponse::notice(INVALID_ID));
    };

    Ok(match CrudService::<R>::get(&state.db, id, &principal).await? {
        Some(row) => ApiResponse::success(row),
        None => ApiResponse::notice(R::not_found_message()),
    })
}

#[instrument(skip_all, fields(resource = R::TABLE))]
pub async fn save<R: Resource>(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    ValidatedJson(input): ValidatedJson<R::Input>,
) -> Result<ApiResponse<SavedId>, AppError> {
    let id = CrudService::<R>::save(&state.db, input, &principal).await?;
    Ok(ApiResponse::ok(SavedId { id }, R::saved_message()))
}

#[instrument(skip_all, fields(resource = R::TABLE, id = %raw_id))]
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(raw_id): Path<String>,
) -> Result<ApiResponse<R::Row>, AppError> {
    let Some(id) = path_id(&raw_id) else {
        return Ok(ApiResponse::notice(INVALID_ID));
    };

    Ok(match CrudService::<R>::delete(&state.db, id, &principal).await? {
        Some(row) => ApiResponse::success(row),
        None => ApiResponse::notice(R::not_found_message()),
    })
}
