//! Token creation and verification.
//!
//! ```ignore
//! use campus_auth::{PortalRole, create_access_token, verify_token};
//!
//! let token = create_access_token(7, PortalRole::Teacher, &jwt_config)?;
//! let claims = verify_token(&token, &jwt_config)?;
//! assert_eq!(claims.principal_id(), Some(7));
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use campus_config::JwtConfig;
use campus_core::AppError;

use crate::claims::{Claims, TokenKind};
use crate::role::PortalRole;

pub const TOKEN_INVALID: &str = "Token Invalid";
pub const REFRESH_TOKEN_INVALID: &str = "Refresh Token Not Valid";

fn issue(
    principal_id: i64,
    role: PortalRole,
    kind: TokenKind,
    lifetime: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: principal_id.to_string(),
        role,
        kind,
        exp: now + lifetime.max(0) as usize,
        iat: now,
        jti: (kind == TokenKind::Refresh).then(|| Uuid::new_v4().to_string()),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

fn decode_claims(token: &str, jwt_config: &JwtConfig) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

pub fn create_access_token(
    principal_id: i64,
    role: PortalRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    issue(
        principal_id,
        role,
        TokenKind::Access,
        jwt_config.access_token_expiry,
        jwt_config,
    )
}

pub fn create_refresh_token(
    principal_id: i64,
    role: PortalRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    issue(
        principal_id,
        role,
        TokenKind::Refresh,
        jwt_config.refresh_token_expiry,
        jwt_config,
    )
}

/// Verifies signature, expiry and that the token is an access token.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode_claims(token, jwt_config)
        .filter(|claims| claims.kind == TokenKind::Access)
        .ok_or_else(|| AppError::unauthorized(TOKEN_INVALID))
}

/// Verifies a refresh token issued for `role`.
pub fn verify_refresh_token(
    token: &str,
    role: PortalRole,
    jwt_config: &JwtConfig,
) -> Result<Claims, AppError> {
    decode_claims(token, jwt_config)
        .filter(|claims| claims.kind == TokenKind::Refresh && claims.role == role)
        .ok_or_else(|| AppError::unauthorized(REFRESH_TOKEN_INVALID))
}
