use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::crud::SavedId;
use crate::modules::assignments::model::{
    Assignment, AssignmentMaterial, AssignmentQuestion, AssignmentQuestionDto, AssignmentStudent,
    SaveAssignmentDto, SubmittedAssignment,
};
use crate::modules::auth::model::{
    AccessTokenRequest, AccessTokenResponse, AdminDetails, LoginRequest, TokenPair,
};
use crate::modules::batches::model::{
    AccessibleSemester, Batch, Division, SaveBatchDto, SaveDivisionDto,
};
use crate::modules::courses::model::{
    Course, SaveCourseDto, SaveStudentDocumentDto, StudentDocument,
};
use crate::modules::events::model::{
    ApprovalStatus, Event, EventApprovalDto, EventOrganiser, EventParticipant, JoinEventDto,
    OrganiserApprovalDto, SaveEventDto,
};
use crate::modules::semesters::model::{SaveSemesterDto, Semester};
use crate::modules::students::model::{
    MaterialSummary, QuizSummary, SaveStudentDto, SemesterWithSubjects, Student, StudentBatch,
    StudentDocumentUploadDto, StudentSubject, StudentUnit, SubjectSummary, UnitSummary,
    UploadedDocument,
};
use crate::modules::subjects::model::{SaveSubjectDto, Subject, SubjectType};
use crate::modules::teachers::model::{
    DivisionSubjectTeacher, DivisionSubjectTeachersResponse, SaveDivisionSubjectTeacherDto,
    SaveTeacherDto, SaveTeacherRoleDto, Teacher, TeacherDivision, TeacherRole, TeacherSubject,
};
use crate::modules::units::model::{
    QuizOption, QuizOptionDto, QuizQuestion, QuizQuestionDto, SaveUnitDto, SaveUnitMaterialDto,
    SaveUnitQuizDto, Unit, UnitMaterial, UnitQuiz,
};

/// OpenAPI document served by Swagger UI and Scalar.
///
/// The generic CRUD endpoints (`GET /{list}`, `POST /{item}`,
/// `GET|DELETE /{item}/{id}`) are described through their row and DTO
/// schemas; the hand-written endpoints are listed as paths.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::access_token,
        crate::modules::auth::controller::admin_details,
        crate::modules::auth::controller::teacher_details,
        crate::modules::auth::controller::student_details,
        crate::modules::teachers::controller::get_division_subject_teachers,
        crate::modules::teachers::controller::save_division_subject_teacher,
        crate::modules::teachers::controller::get_teacher_divisions,
        crate::modules::teachers::controller::get_teacher_subjects_by_division,
        crate::modules::events::controller::set_event_approval,
        crate::modules::events::controller::join_event_organisers,
        crate::modules::events::controller::join_event_participants,
        crate::modules::events::controller::remove_event_participant,
        crate::modules::events::controller::set_event_organiser_approval,
        crate::modules::assignments::controller::get_students_by_assignment,
        crate::modules::assignments::controller::get_submitted_assignment,
        crate::modules::students::controller::get_student_batch,
        crate::modules::students::controller::get_student_subject,
        crate::modules::students::controller::get_student_unit,
    ),
    components(
        schemas(
            SavedId,
            LoginRequest,
            TokenPair,
            AccessTokenRequest,
            AccessTokenResponse,
            AdminDetails,
            Course,
            SaveCourseDto,
            StudentDocument,
            SaveStudentDocumentDto,
            Semester,
            SaveSemesterDto,
            Subject,
            SaveSubjectDto,
            SubjectType,
            Unit,
            SaveUnitDto,
            UnitMaterial,
            SaveUnitMaterialDto,
            UnitQuiz,
            SaveUnitQuizDto,
            QuizQuestion,
            QuizOption,
            QuizQuestionDto,
            QuizOptionDto,
            Batch,
            SaveBatchDto,
            AccessibleSemester,
            Division,
            SaveDivisionDto,
            Teacher,
            SaveTeacherDto,
            TeacherRole,
            SaveTeacherRoleDto,
            DivisionSubjectTeacher,
            DivisionSubjectTeachersResponse,
            SaveDivisionSubjectTeacherDto,
            TeacherDivision,
            TeacherSubject,
            Student,
            SaveStudentDto,
            StudentDocumentUploadDto,
            UploadedDocument,
            StudentBatch,
            SemesterWithSubjects,
            SubjectSummary,
            StudentSubject,
            UnitSummary,
            StudentUnit,
            MaterialSummary,
            QuizSummary,
            Assignment,
            SaveAssignmentDto,
            AssignmentQuestion,
            AssignmentQuestionDto,
            AssignmentMaterial,
            AssignmentStudent,
            SubmittedAssignment,
            Event,
            SaveEventDto,
            ApprovalStatus,
            EventOrganiser,
            EventParticipant,
            EventApprovalDto,
            JoinEventDto,
            OrganiserApprovalDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token refresh for every portal"),
        (name = "Admin", description = "Curriculum, cohorts, staff and students"),
        (name = "Teacher", description = "Units, assignments and events for the signed-in teacher"),
        (name = "Student", description = "The signed-in student's batch, subjects and units")
    ),
    info(
        title = "Campus API",
        version = "0.1.0",
        description = "Academic management backend with admin, teacher and student portals, built with Rust, Axum and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_portal_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/{portal}/auth/login"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/student/unit/{unitId}"));
        assert!(
            doc.components
                .as_ref()
                .is_some_and(|c| c.security_schemes.contains_key("bearer_auth"))
        );
    }
}
