use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: i64,
    pub course_id: i64,
    pub sem_number: i64,
    pub duration: i64,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveSemesterDto {
    pub id: Option<i64>,
    pub course_id: i64,
    #[validate(range(min = 1, message = "Sem Number is required"))]
    pub sem_number: i64,
    #[validate(range(min = 1, message = "Duration is required"))]
    pub duration: i64,
    pub status: Option<bool>,
}
