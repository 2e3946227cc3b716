use campus_core::normalize::deserialize_trimmed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: i64,
    pub subject_id: i64,
    pub name: String,
    pub number: i64,
    pub description: Option<String>,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveUnitDto {
    pub id: Option<i64>,
    pub subject_id: i64,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, max = 100, message = "Unit Name must be 3 to 100 characters"))]
    pub name: String,
    #[validate(range(min = 0, message = "Unit Number is required"))]
    pub number: i64,
    pub description: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitMaterial {
    pub id: i64,
    pub unit_id: i64,
    pub name: String,
    pub link: String,
    pub description: Option<String>,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveUnitMaterialDto {
    pub id: Option<i64>,
    pub unit_id: i64,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(
        min = 3,
        max = 100,
        message = "Unit Material Name must be 3 to 100 characters"
    ))]
    pub name: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, message = "File is required"))]
    pub link: String,
    pub description: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub id: i64,
    pub value: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: i64,
    pub question: String,
    pub question_order: i64,
    pub options: Vec<QuizOption>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitQuiz {
    pub id: i64,
    pub unit_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: bool,
    /// Ordered by `questionOrder`.
    #[schema(value_type = Vec<QuizQuestion>)]
    pub questions: Json<Vec<QuizQuestion>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizOptionDto {
    /// Options without a value are dropped on save.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionDto {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,
    #[serde(default)]
    pub options: Vec<QuizOptionDto>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveUnitQuizDto {
    pub id: Option<i64>,
    pub unit_id: i64,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, max = 100, message = "Unit Quiz Name must be 3 to 100 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub status: Option<bool>,
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<QuizQuestionDto>,
}
