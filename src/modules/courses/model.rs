use campus_core::normalize::deserialize_trimmed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub abbr: String,
    pub duration: i64,
    pub description: Option<String>,
    pub program_outcome: Option<String>,
    pub departmental_strength: Option<String>,
    pub about_facility: Option<String>,
    pub eligibility: Option<String>,
    pub significance: Option<String>,
    pub vision: Option<String>,
    pub mission: Option<String>,
    pub technical_activities: Option<String>,
    pub status: bool,
    /// Documents a student of this course has to upload.
    pub document_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveCourseDto {
    pub id: Option<i64>,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, max = 100, message = "Course Name must be 3 to 100 characters"))]
    pub name: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 20, message = "Course Abbreviation must be 1 to 20 characters"))]
    pub abbr: String,
    #[validate(range(min = 1, message = "Duration is required"))]
    pub duration: i64,
    pub description: Option<String>,
    pub program_outcome: Option<String>,
    pub departmental_strength: Option<String>,
    pub about_facility: Option<String>,
    pub eligibility: Option<String>,
    pub significance: Option<String>,
    pub vision: Option<String>,
    pub mission: Option<String>,
    pub technical_activities: Option<String>,
    pub status: Option<bool>,
    #[serde(default)]
    pub documents: Vec<i64>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDocument {
    pub id: i64,
    pub name: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveStudentDocumentDto {
    pub id: Option<i64>,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(
        min = 1,
        max = 55,
        message = "Student Document Name must be 1 to 55 characters"
    ))]
    pub name: String,
    pub status: Option<bool>,
}
