#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use campus::config::{CorsConfig, JwtConfig, RateLimitConfig};
use campus::router::init_router;
use campus::state::AppState;
use campus_auth::{PortalRole, create_access_token};
use campus_core::password::hash_password_with_cost;

pub const PASSWORD: &str = "secret123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::from_lookup(|_| None)
}

pub fn setup_test_app(pool: PgPool) -> Router {
    setup_test_app_with_rate_limit(pool, RateLimitConfig::disabled())
}

pub fn setup_test_app_with_rate_limit(pool: PgPool, rate_limit_config: RateLimitConfig) -> Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig::from_lookup(|_| None),
        rate_limit_config,
    };
    init_router(state)
}

pub fn token_for(id: i64, portal: PortalRole) -> String {
    create_access_token(id, portal, &test_jwt_config()).unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

fn password_hash() -> String {
    hash_password_with_cost(PASSWORD, 4).unwrap()
}

/// Sends a request and returns the status with the parsed envelope.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn create_admin(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO admins (first_name, last_name, email, password)
         VALUES ('Ada', 'Admin', $1, $2) RETURNING id",
    )
    .bind(email)
    .bind(password_hash())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_teacher_role(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO teacher_roles (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_teacher(pool: &PgPool, first_name: &str, email: &str) -> i64 {
    let role_id = create_teacher_role(pool, "Lecturer").await;
    sqlx::query_scalar(
        "INSERT INTO teachers (role_id, first_name, last_name, email, password, gender)
         VALUES ($1, $2, 'Teacher', $3, $4, 'female') RETURNING id",
    )
    .bind(role_id)
    .bind(first_name)
    .bind(email)
    .bind(password_hash())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_course(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO courses (name, abbr, duration) VALUES ($1, 'CRS', 3) RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_semester(pool: &PgPool, course_id: i64, sem_number: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO semesters (course_id, sem_number, duration) VALUES ($1, $2, 6) RETURNING id",
    )
    .bind(course_id)
    .bind(sem_number)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_subject(pool: &PgPool, semester_id: i64, name: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO subjects (semester_id, subject_type_id, name, abbr, code, credits)
         VALUES ($1, (SELECT id FROM subject_types ORDER BY id LIMIT 1), $2, 'SUB', $3, 4)
         RETURNING id",
    )
    .bind(semester_id)
    .bind(name)
    .bind(format!("C-{}", Uuid::new_v4().simple()))
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_unit(pool: &PgPool, subject_id: i64, name: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO units (subject_id, name, number) VALUES ($1, $2, 1) RETURNING id",
    )
    .bind(subject_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_batch(pool: &PgPool, course_id: i64, year: i64, semester_ids: &[i64]) -> i64 {
    let batch_id: i64 =
        sqlx::query_scalar("INSERT INTO batches (course_id, year) VALUES ($1, $2) RETURNING id")
            .bind(course_id)
            .bind(year)
            .fetch_one(pool)
            .await
            .unwrap();

    sqlx::query(
        "INSERT INTO batch_semester_maps (batch_id, semester_id) SELECT $1, UNNEST($2::BIGINT[])",
    )
    .bind(batch_id)
    .bind(semester_ids)
    .execute(pool)
    .await
    .unwrap();

    batch_id
}

pub async fn create_division(pool: &PgPool, batch_id: i64, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO divisions (batch_id, name) VALUES ($1, $2) RETURNING id")
        .bind(batch_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_student(
    pool: &PgPool,
    division_id: i64,
    roll_number: &str,
    email: &str,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO students (course_id, batch_id, division_id, roll_number, first_name, last_name, email, password, gender)
         SELECT b.course_id, b.id, d.id, $2, 'Sam', 'Student', $3, $4, 'male'
         FROM divisions d JOIN batches b ON b.id = d.batch_id
         WHERE d.id = $1
         RETURNING id",
    )
    .bind(division_id)
    .bind(roll_number)
    .bind(email)
    .bind(password_hash())
    .fetch_one(pool)
    .await
    .unwrap()
}

/// A course with one semester, subject and unit, and a batch with access to
/// the semester and one division.
pub struct Cohort {
    pub course_id: i64,
    pub semester_id: i64,
    pub subject_id: i64,
    pub unit_id: i64,
    pub batch_id: i64,
    pub division_id: i64,
}

pub async fn create_cohort(pool: &PgPool) -> Cohort {
    let course_id = create_course(pool, "Computer Science").await;
    let semester_id = create_semester(pool, course_id, 1).await;
    let subject_id = create_subject(pool, semester_id, "Algorithms").await;
    let unit_id = create_unit(pool, subject_id, "Sorting").await;
    let batch_id = create_batch(pool, course_id, 2024, &[semester_id]).await;
    let division_id = create_division(pool, batch_id, "A").await;

    Cohort {
        course_id,
        semester_id,
        subject_id,
        unit_id,
        batch_id,
        division_id,
    }
}
