use axum::Extension;
use axum::extract::State;
use tracing::instrument;

use campus_auth::PortalRole;
use campus_core::{AppError, ApiResponse};

use crate::crud::CrudService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::NO_SUCH_USER;
use crate::modules::auth::model::{
    AccessTokenRequest, AccessTokenResponse, AdminDetails, LoginRequest, TokenPair,
};
use crate::modules::auth::service::{AuthService, LOGIN_SUCCESSFUL};
use crate::modules::students::{Student, Students};
use crate::modules::teachers::{Teacher, Teachers};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Log in to a portal
#[utoipa::path(
    post,
    path = "/api/{portal}/auth/login",
    params(("portal" = String, Path, description = "admin, teacher or student")),
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair, or status false with \"Incorrect Email.\" / \"Incorrect Password.\"", body = TokenPair),
        (status = 429, description = "Too many login attempts")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    Extension(portal): Extension<PortalRole>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<TokenPair>, AppError> {
    let tokens = AuthService::login(&state.db, portal, dto, &state.jwt_config).await?;
    Ok(ApiResponse::ok(tokens, LOGIN_SUCCESSFUL))
}

/// Exchange a refresh token for an access token
#[utoipa::path(
    post,
    path = "/api/{portal}/auth/access-token",
    params(("portal" = String, Path, description = "admin, teacher or student")),
    request_body = AccessTokenRequest,
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 401, description = "Refresh Token Not Valid")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn access_token(
    State(state): State<AppState>,
    Extension(portal): Extension<PortalRole>,
    ValidatedJson(dto): ValidatedJson<AccessTokenRequest>,
) -> Result<ApiResponse<AccessTokenResponse>, AppError> {
    let response =
        AuthService::access_token(&state.db, portal, &dto.refresh_token, &state.jwt_config)
            .await?;
    Ok(ApiResponse::success(response))
}

fn details_or_missing<T>(row: Option<T>) -> Result<ApiResponse<T>, AppError> {
    row.map(ApiResponse::success)
        .ok_or_else(|| AppError::unauthorized(NO_SUCH_USER))
}

#[utoipa::path(
    get,
    path = "/api/admin/details",
    responses((status = 200, description = "The signed-in admin", body = AdminDetails)),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn admin_details(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<AdminDetails>, AppError> {
    details_or_missing(AuthService::admin_details(&state.db, auth_user.id()).await?)
}

#[utoipa::path(
    get,
    path = "/api/teacher/details",
    responses((status = 200, description = "The signed-in teacher", body = Teacher)),
    tag = "Teacher",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn teacher_details(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<ApiResponse<Teacher>, AppError> {
    details_or_missing(CrudService::<Teachers>::get(&state.db, principal.id, &principal).await?)
}

#[utoipa::path(
    get,
    path = "/api/student/details",
    responses((status = 200, description = "The signed-in student", body = Student)),
    tag = "Student",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn student_details(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<ApiResponse<Student>, AppError> {
    details_or_missing(CrudService::<Students>::get(&state.db, principal.id, &principal).await?)
}
