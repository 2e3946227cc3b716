mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use campus::config::RateLimitConfig;
use common::{send, setup_test_app_with_rate_limit};

/// One login attempt, refilled slowly.
fn strict_rate_limit_config() -> RateLimitConfig {
    RateLimitConfig {
        enabled: true,
        auth_per_second: 60,
        auth_burst_size: 1,
    }
}

fn login_request(ip: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri("/api/admin/auth/login")
        .header("content-type", "application/json")
        .header("x-forwarded-for", ip)
        .body(axum::body::Body::from(
            json!({ "email": "someone@test.com", "password": "secret123" }).to_string(),
        ))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_auth_rate_limit_exceeded(pool: PgPool) {
    use tower::ServiceExt;

    let app = setup_test_app_with_rate_limit(pool, strict_rate_limit_config());

    let first = app.clone().oneshot(login_request("192.168.1.100")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.clone().oneshot(login_request("192.168.1.100")).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rate_limit_is_per_client(pool: PgPool) {
    use tower::ServiceExt;

    let app = setup_test_app_with_rate_limit(pool, strict_rate_limit_config());

    let first = app.clone().oneshot(login_request("10.0.0.1")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let other_client = app.clone().oneshot(login_request("10.0.0.2")).await.unwrap();
    assert_eq!(other_client.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rate_limit_does_not_touch_protected_routes(pool: PgPool) {
    let app = setup_test_app_with_rate_limit(pool, strict_rate_limit_config());

    for _ in 0..3 {
        let (status, _) = send(&app, "GET", "/api/admin/courses", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
