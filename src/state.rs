use sqlx::PgPool;

use crate::config::{CorsConfig, JwtConfig, RateLimitConfig, ServerConfig};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

pub async fn init_app_state(server_config: &ServerConfig) -> AppState {
    AppState {
        db: campus_db::init_db_pool(server_config.database_max_connections).await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
    }
}
