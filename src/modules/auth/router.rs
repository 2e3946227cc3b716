use std::sync::Arc;

use axum::{Extension, Router, routing::post};
use tower_governor::GovernorLayer;

use campus_auth::PortalRole;

use crate::config::RateLimitConfig;
use crate::state::AppState;

use super::controller::{access_token, login};

/// `/login` and `/access-token` for one portal, throttled per client IP
/// unless rate limiting is disabled.
pub fn init_auth_router(portal: PortalRole, rate_limit: &RateLimitConfig) -> Router<AppState> {
    let router = Router::new()
        .route("/login", post(login))
        .route("/access-token", post(access_token))
        .layer(Extension(portal));

    match rate_limit.auth_governor_config() {
        Some(config) => router.layer(GovernorLayer::new(Arc::new(config))),
        None => router,
    }
}
