use campus_core::normalize::deserialize_trimmed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessibleSemester {
    pub id: i64,
    pub sem_number: i64,
    pub duration: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub year: i64,
    pub status: bool,
    /// Ordered by semester number.
    #[schema(value_type = Vec<AccessibleSemester>)]
    pub accessible_semesters: Json<Vec<AccessibleSemester>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveBatchDto {
    pub id: Option<i64>,
    pub course_id: i64,
    #[validate(range(min = 1900, max = 9999, message = "Year is required"))]
    pub year: i64,
    pub status: Option<bool>,
    #[serde(default)]
    pub accessible_semester_ids: Vec<i64>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub id: i64,
    pub batch_id: i64,
    pub name: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveDivisionDto {
    pub id: Option<i64>,
    pub batch_id: i64,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 5, message = "Division Name must be 1 to 5 characters"))]
    pub name: String,
    pub status: Option<bool>,
}
