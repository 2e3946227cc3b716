use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use campus_auth::{PortalRole, Principal};
use campus_core::AppError;

pub const NO_TOKEN: &str = "No authorization Token Provided";

/// The principal attached by the role middleware.
///
/// Only usable on routes behind [`crate::middleware::role`]; anywhere else
/// it rejects as if no token had been sent.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }

    pub fn role(&self) -> PortalRole {
        self.0.role
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized(NO_TOKEN))
    }
}

/// Reads `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
