use sqlx::PgPool;

use campus_core::hash_password;

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Inserts an active admin and returns its id.
pub async fn create_admin(
    db: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> CliResult<i64> {
    if password.is_empty() {
        return Err("Password is required".into());
    }
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO admins (first_name, last_name, email, password)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(first_name.trim())
    .bind(last_name.trim())
    .bind(email.trim())
    .bind(&hashed_password)
    .fetch_optional(db)
    .await?;

    id.ok_or_else(|| "Admin with this email already exists".into())
}
