use campus_core::normalize::deserialize_trimmed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentQuestion {
    pub id: i64,
    pub question: String,
    pub question_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentMaterial {
    pub id: i64,
    pub material_url: String,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub subject_name: String,
    pub division_id: i64,
    pub division_name: String,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: bool,
    /// Active questions in order.
    #[schema(value_type = Vec<AssignmentQuestion>)]
    pub questions: Json<Vec<AssignmentQuestion>>,
    #[schema(value_type = Vec<AssignmentMaterial>)]
    pub materials: Json<Vec<AssignmentMaterial>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentQuestionDto {
    /// Id of an existing question to keep and update.
    #[serde(default, alias = "db_id")]
    pub db_id: Option<i64>,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, message = "Question is required"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveAssignmentDto {
    pub id: Option<i64>,
    pub subject_id: i64,
    pub division_id: i64,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 150, message = "Assignment Name must be 1 to 150 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<bool>,
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<AssignmentQuestionDto>,
    /// Material urls; replaces the active set.
    #[serde(default, alias = "material")]
    pub materials: Vec<String>,
}

/// A student of the assignment's division and their submission, if any.
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentStudent {
    pub id: i64,
    pub roll_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub submitted_assignment_id: Option<i64>,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAssignment {
    pub id: i64,
    pub assignment_id: i64,
    pub assignment_name: String,
    pub student_id: i64,
    pub roll_number: String,
    pub first_name: String,
    pub last_name: String,
    pub answer: Option<String>,
    pub attachment_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
}
