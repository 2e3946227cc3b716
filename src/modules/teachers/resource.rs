use async_trait::async_trait;

use campus_auth::{PortalRole, Principal};
use campus_core::filter::{SearchColumn, like_if_value, where_if_value, where_some_if_value};
use campus_core::normalize::int_or_none;
use campus_core::{AppError, Columns, Filter, Relation, hash_password};

use crate::crud::{Access, DeletionPolicy, ListParams, Resource};
use crate::modules::courses::resource::active_unless_show_all;
use crate::modules::teachers::model::{SaveTeacherDto, SaveTeacherRoleDto, Teacher, TeacherRole};

pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const ADMIN_ONLY_CREATE: &str = "Only An Admin Can Add Teachers.";

pub(crate) const PERSON_SEARCH: &[SearchColumn] = &[
    SearchColumn::Composite(&["first_name", "last_name"]),
    SearchColumn::Single("first_name"),
    SearchColumn::Single("last_name"),
    SearchColumn::Single("email"),
];

/// Hashes the password when given; a new account must carry one.
pub(crate) fn password_column(
    columns: Columns,
    password: Option<&str>,
    id: Option<i64>,
) -> Result<Columns, AppError> {
    match (password, id) {
        (Some(password), _) => Ok(columns.set("password", hash_password(password)?)),
        (None, Some(_)) => Ok(columns),
        (None, None) => Err(AppError::rejected(PASSWORD_REQUIRED)),
    }
}

pub struct Teachers;

#[async_trait]
impl Resource for Teachers {
    type Row = Teacher;
    type Input = SaveTeacherDto;

    const TABLE: &'static str = "teachers";
    const LABEL: &'static str = "Teacher";
    const LIST_KEY: &'static str = "teachers";
    const COUNT_KEY: &'static str = "teacherCount";
    const SELECT: &'static str = "t.id, t.role_id, r.name AS role_name, t.first_name, t.last_name, \
         t.email, t.gender, t.profile_img, t.address, t.qualification, t.experience, t.about, \
         t.awards_and_recognition, t.guest_speaker_and_resource_person, t.participation_in_cwtp, \
         t.research_publications, t.certification_courses, t.books_or_chapter, \
         t.professional_memberships, t.status, t.created_at, t.updated_at";
    const JOINS: &'static str = "JOIN teacher_roles r ON r.id = t.role_id";
    const ORDER_BY: &'static str = "t.first_name ASC, t.last_name ASC";

    fn compose(
        params: &ListParams,
        filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        where_if_value(filter, "role_id", params.get("roleId"), int_or_none);
        where_some_if_value(
            filter,
            Relation::children("division_subject_teachers", "teacher_id"),
            "division_id",
            params.get("divisionId"),
            int_or_none,
        );
        like_if_value(filter, PERSON_SEARCH, params.search_text());
        Ok(())
    }

    /// Teachers may only change their own profile.
    fn scope(filter: &mut Filter, principal: &Principal, access: Access) {
        if access == Access::Write && principal.role == PortalRole::Teacher {
            filter.where_eq("id", principal.id);
        }
    }

    fn id_of(input: &SaveTeacherDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveTeacherDto,
        principal: &Principal,
        id: Option<i64>,
    ) -> Result<Columns, AppError> {
        if id.is_none() && principal.role != PortalRole::Admin {
            return Err(AppError::rejected(ADMIN_ONLY_CREATE));
        }

        let columns = Columns::new()
            .set("role_id", input.role_id)
            .set("first_name", input.first_name.as_str())
            .set("last_name", input.last_name.as_str())
            .set("email", input.email.trim().to_lowercase())
            .set("gender", input.gender.as_str())
            .set("profile_img", input.profile_img.clone())
            .set("address", input.address.clone())
            .set("qualification", input.qualification.clone())
            .set("experience", input.experience.clone())
            .set("about", input.about.clone())
            .set("awards_and_recognition", input.awards_and_recognition.clone())
            .set(
                "guest_speaker_and_resource_person",
                input.guest_speaker_and_resource_person.clone(),
            )
            .set("participation_in_cwtp", input.participation_in_cwtp.clone())
            .set("research_publications", input.research_publications.clone())
            .set("certification_courses", input.certification_courses.clone())
            .set("books_or_chapter", input.books_or_chapter.clone())
            .set("professional_memberships", input.professional_memberships.clone())
            .set_some("status", input.status);

        password_column(columns, input.password.as_deref(), id)
    }
}

pub struct TeacherRoles;

#[async_trait]
impl Resource for TeacherRoles {
    type Row = TeacherRole;
    type Input = SaveTeacherRoleDto;

    const TABLE: &'static str = "teacher_roles";
    const LABEL: &'static str = "Teacher Role";
    const LIST_KEY: &'static str = "teacherRoles";
    const COUNT_KEY: &'static str = "teacherRoleCount";
    const DELETION: DeletionPolicy = DeletionPolicy::Soft { flag: "status" };

    fn compose(
        params: &ListParams,
        filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        active_unless_show_all(params, filter);
        like_if_value(filter, &[SearchColumn::Single("name")], params.search_text());
        Ok(())
    }

    fn id_of(input: &SaveTeacherRoleDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveTeacherRoleDto,
        _principal: &Principal,
        _id: Option<i64>,
    ) -> Result<Columns, AppError> {
        Ok(Columns::new()
            .set("name", input.name.as_str())
            .set_some("status", input.status))
    }
}
