//! Portal authorization middleware.
//!
//! Each portal router is wrapped with one of [`require_admin`],
//! [`require_teacher`] or [`require_student`]:
//!
//! 1. no bearer token: 401 "No authorization Token Provided"
//! 2. token fails verification: 401 "Token Invalid"
//! 3. no active principal with that id in the portal's table, or the token
//!    was issued for another portal: 401 "No Such User"
//!
//! On success the [`Principal`] is inserted into the request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sqlx::PgPool;
use tracing::instrument;

use campus_auth::{Claims, PortalRole, Principal, verify_token};
use campus_core::AppError;

use crate::middleware::auth::{NO_TOKEN, bearer_token};
use crate::state::AppState;

pub const NO_SUCH_USER: &str = "No Such User";

pub async fn require_portal(
    state: &AppState,
    mut req: Request,
    next: Next,
    portal: PortalRole,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or_else(|| AppError::unauthorized(NO_TOKEN))?;
    let claims = verify_token(token, &state.jwt_config)?;

    let principal = load_principal(&state.db, &claims, portal)
        .await?
        .ok_or_else(|| AppError::unauthorized(NO_SUCH_USER))?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Finds the active principal the claims point at, if it belongs to `portal`.
#[instrument(skip(db, claims), fields(sub = %claims.sub))]
pub async fn load_principal(
    db: &PgPool,
    claims: &Claims,
    portal: PortalRole,
) -> Result<Option<Principal>, AppError> {
    if claims.role != portal {
        return Ok(None);
    }
    let Some(id) = claims.principal_id() else {
        return Ok(None);
    };

    let sql = format!(
        "SELECT id, email FROM {} WHERE id = $1 AND status = TRUE",
        portal.table()
    );
    let row = sqlx::query_as::<_, (i64, String)>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;

    Ok(row.map(|(id, email)| Principal {
        id,
        role: portal,
        email,
    }))
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_portal(&state, req, next, PortalRole::Admin)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_portal(&state, req, next, PortalRole::Teacher)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_portal(&state, req, next, PortalRole::Student)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}
