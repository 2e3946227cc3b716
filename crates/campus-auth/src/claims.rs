//! JWT claim structures.
//!
//! Access and refresh tokens share one claim shape and are told apart by
//! [`TokenKind`], so a refresh token can never be replayed as a bearer token.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::role::PortalRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Principal id in the portal's table
    pub sub: String,
    pub role: PortalRole,
    pub kind: TokenKind,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Unique id, set on refresh tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// The numeric principal id, if `sub` holds one.
    pub fn principal_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
