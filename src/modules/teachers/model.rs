use campus_core::normalize::deserialize_trimmed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: i64,
    pub role_id: i64,
    pub role_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub profile_img: Option<String>,
    pub address: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<String>,
    pub about: Option<String>,
    pub awards_and_recognition: Option<String>,
    pub guest_speaker_and_resource_person: Option<String>,
    pub participation_in_cwtp: Option<String>,
    pub research_publications: Option<String>,
    pub certification_courses: Option<String>,
    pub books_or_chapter: Option<String>,
    pub professional_memberships: Option<String>,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveTeacherDto {
    pub id: Option<i64>,
    pub role_id: i64,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 2, max = 100, message = "First Name must be 2 to 100 characters"))]
    pub first_name: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 2, max = 100, message = "Last Name must be 2 to 100 characters"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    /// Required when creating; left unchanged on update when absent.
    #[validate(length(min = 3, max = 45, message = "Password must be 3 to 45 characters"))]
    pub password: Option<String>,
    #[validate(custom(function = "crate::validator::validate_gender"))]
    pub gender: String,
    pub profile_img: Option<String>,
    pub address: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<String>,
    pub about: Option<String>,
    pub awards_and_recognition: Option<String>,
    pub guest_speaker_and_resource_person: Option<String>,
    pub participation_in_cwtp: Option<String>,
    pub research_publications: Option<String>,
    pub certification_courses: Option<String>,
    pub books_or_chapter: Option<String>,
    pub professional_memberships: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRole {
    pub id: i64,
    pub name: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveTeacherRoleDto {
    pub id: Option<i64>,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 55, message = "Teacher Role Name must be 1 to 55 characters"))]
    pub name: String,
    pub status: Option<bool>,
}

/// An active subject assignment of a division.
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DivisionSubjectTeacher {
    pub id: i64,
    pub division_id: i64,
    pub subject_id: i64,
    pub subject_name: String,
    pub teacher_id: i64,
    pub teacher_first_name: String,
    pub teacher_last_name: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DivisionSubjectTeachersResponse {
    pub division_subject_teachers: Vec<DivisionSubjectTeacher>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveDivisionSubjectTeacherDto {
    pub division_id: i64,
    pub subject_id: i64,
    /// Absent to leave the subject unassigned.
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DivisionQuery {
    pub division_id: Option<String>,
}

/// A division the current teacher teaches in, with its batch and course.
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDivision {
    pub id: i64,
    pub name: String,
    pub batch_id: i64,
    pub batch_year: i64,
    pub course_id: i64,
    pub course_name: String,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSubject {
    pub id: i64,
    pub semester_id: i64,
    pub name: String,
    pub abbr: String,
    pub code: String,
    pub credits: i64,
}
