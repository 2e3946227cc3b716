use sqlx::PgPool;
use tracing::{info, instrument, warn};

use campus_auth::{
    PortalRole, create_access_token, create_refresh_token, jwt::REFRESH_TOKEN_INVALID,
    verify_refresh_token,
};
use campus_config::JwtConfig;
use campus_core::{AppError, verify_password};

use crate::middleware::role::load_principal;
use crate::modules::auth::model::{AccessTokenResponse, AdminDetails, LoginRequest, TokenPair};

pub const INCORRECT_EMAIL: &str = "Incorrect Email.";
pub const INCORRECT_PASSWORD: &str = "Incorrect Password.";
pub const LOGIN_SUCCESSFUL: &str = "Login Successful";

pub struct AuthService;

impl AuthService {
    /// Checks credentials against the portal's table and issues a token pair.
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        portal: PortalRole,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenPair, AppError> {
        let sql = format!(
            "SELECT id, password FROM {} WHERE LOWER(email) = LOWER($1) AND status = TRUE",
            portal.table()
        );
        let Some((id, password_hash)) = sqlx::query_as::<_, (i64, String)>(&sql)
            .bind(dto.email.trim())
            .fetch_optional(db)
            .await?
        else {
            warn!(%portal, "Login with unknown email");
            return Err(AppError::rejected(INCORRECT_EMAIL));
        };

        if !verify_password(&dto.password, &password_hash)? {
            warn!(%portal, id, "Login with wrong password");
            return Err(AppError::rejected(INCORRECT_PASSWORD));
        }

        info!(%portal, id, "Login successful");
        Ok(TokenPair {
            refresh_token: create_refresh_token(id, portal, jwt_config)?,
            access_token: create_access_token(id, portal, jwt_config)?,
        })
    }

    /// Exchanges a refresh token for a new access token, provided the
    /// principal is still active.
    #[instrument(skip(db, refresh_token, jwt_config))]
    pub async fn access_token(
        db: &PgPool,
        portal: PortalRole,
        refresh_token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<AccessTokenResponse, AppError> {
        let claims = verify_refresh_token(refresh_token, portal, jwt_config)?;
        let principal = load_principal(db, &claims, portal)
            .await?
            .ok_or_else(|| AppError::unauthorized(REFRESH_TOKEN_INVALID))?;

        Ok(AccessTokenResponse {
            access_token: create_access_token(principal.id, portal, jwt_config)?,
        })
    }

    #[instrument(skip(db))]
    pub async fn admin_details(db: &PgPool, id: i64) -> Result<Option<AdminDetails>, AppError> {
        let admin = sqlx::query_as::<_, AdminDetails>(
            "SELECT id, first_name, last_name, email, status, created_at FROM admins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(admin)
    }
}
