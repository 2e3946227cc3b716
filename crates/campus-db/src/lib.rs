//! # Campus DB
//!
//! PostgreSQL pool construction for the Campus API.
//!
//! ```ignore
//! use campus_db::init_db_pool;
//!
//! let pool = init_db_pool(10).await;
//! ```

use std::env;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use sqlx::PgPool;

/// Connects to `DATABASE_URL` with at most `max_connections` connections.
///
/// # Panics
///
/// Panics when `DATABASE_URL` is unset or the first connection fails. This
/// runs once at startup.
pub async fn init_db_pool(max_connections: u32) -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    info!(max_connections, "Database pool ready");
    pool
}

/// Applies the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
