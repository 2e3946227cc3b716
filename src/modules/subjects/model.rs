use campus_core::normalize::deserialize_trimmed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: i64,
    pub semester_id: i64,
    pub subject_type_id: i64,
    pub subject_type_name: String,
    pub name: String,
    pub abbr: String,
    pub code: String,
    pub credits: i64,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveSubjectDto {
    pub id: Option<i64>,
    pub semester_id: i64,
    pub subject_type_id: i64,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, max = 100, message = "Subject Name must be 3 to 100 characters"))]
    pub name: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(
        min = 1,
        max = 20,
        message = "Subject Abbreviation must be 1 to 20 characters"
    ))]
    pub abbr: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, max = 45, message = "Subject Code must be 3 to 45 characters"))]
    pub code: String,
    #[validate(range(min = 0, message = "Credits are required"))]
    pub credits: i64,
    pub status: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectType {
    pub id: i64,
    pub name: String,
}
