use campus_core::normalize::deserialize_trimmed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub id: i64,
    pub document_id: i64,
    pub url: String,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub batch_id: i64,
    pub batch_year: i64,
    pub division_id: i64,
    pub division_name: String,
    pub roll_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub profile_img: Option<String>,
    pub address: Option<String>,
    pub status: bool,
    /// Active uploads only.
    #[schema(value_type = Vec<UploadedDocument>)]
    pub documents: Json<Vec<UploadedDocument>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDocumentUploadDto {
    pub document_id: i64,
    /// Entries without a url are skipped.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveStudentDto {
    pub id: Option<i64>,
    pub course_id: i64,
    pub batch_id: i64,
    pub division_id: i64,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, max = 15, message = "Roll Number must be 3 to 15 characters"))]
    pub roll_number: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 2, max = 100, message = "First Name must be 2 to 100 characters"))]
    pub first_name: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 2, max = 100, message = "Last Name must be 2 to 100 characters"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 3, max = 45, message = "Password must be 3 to 45 characters"))]
    pub password: Option<String>,
    #[validate(custom(function = "crate::validator::validate_gender"))]
    pub gender: String,
    pub profile_img: Option<String>,
    pub address: Option<String>,
    pub status: Option<bool>,
    #[serde(default)]
    pub documents: Vec<StudentDocumentUploadDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub id: i64,
    pub subject_type_id: i64,
    pub name: String,
    pub abbr: String,
    pub code: String,
    pub credits: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SemesterWithSubjects {
    pub id: i64,
    pub sem_number: i64,
    pub duration: i64,
    pub subjects: Vec<SubjectSummary>,
}

/// The signed-in student's batch and what it may open.
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentBatch {
    pub id: i64,
    pub year: i64,
    pub course_id: i64,
    pub course_name: String,
    pub course_abbr: String,
    #[schema(value_type = Vec<SemesterWithSubjects>)]
    pub accessible_semesters: Json<Vec<SemesterWithSubjects>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitSummary {
    pub id: i64,
    pub name: String,
    pub number: i64,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentSubject {
    pub id: i64,
    pub semester_id: i64,
    pub subject_type_name: String,
    pub name: String,
    pub abbr: String,
    pub code: String,
    pub credits: i64,
    #[schema(value_type = Vec<UnitSummary>)]
    pub units: Json<Vec<UnitSummary>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    pub id: i64,
    pub name: String,
    pub link: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentUnit {
    pub id: i64,
    pub subject_id: i64,
    pub name: String,
    pub number: i64,
    pub description: Option<String>,
    #[schema(value_type = Vec<MaterialSummary>)]
    pub materials: Json<Vec<MaterialSummary>>,
    #[schema(value_type = Vec<QuizSummary>)]
    pub quizzes: Json<Vec<QuizSummary>>,
}
