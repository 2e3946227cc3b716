use async_trait::async_trait;
use campus_auth::Principal;
use campus_core::filter::{SearchColumn, like_if_value, where_if_value};
use campus_core::normalize::int_or_none;
use campus_core::{AppError, Columns, Filter};

use crate::crud::{ListParams, NoInput, Resource};
use crate::modules::subjects::model::{SaveSubjectDto, Subject, SubjectType};

pub struct Subjects;

#[async_trait]
impl Resource for Subjects {
    type Row = Subject;
    type Input = SaveSubjectDto;

    const TABLE: &'static str = "subjects";
    const LABEL: &'static str = "Subject";
    const LIST_KEY: &'static str = "subjects";
    const COUNT_KEY: &'static str = "subjectCount";
    const SELECT: &'static str = "t.*, st.name AS subject_type_name";
    const JOINS: &'static str = "JOIN subject_types st ON st.id = t.subject_type_id";

    fn compose(
        params: &ListParams,
        filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        let semester_id = params.require_int("semesterId", "Send Semester ID")?;
        filter.where_eq("semester_id", semester_id);
        where_if_value(filter, "subject_type_id", params.get("subjectTypeId"), int_or_none);
        like_if_value(
            filter,
            &[SearchColumn::Single("name"), SearchColumn::Single("code")],
            params.search_text(),
        );
        Ok(())
    }

    fn id_of(input: &SaveSubjectDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveSubjectDto,
        _principal: &Principal,
        _id: Option<i64>,
    ) -> Result<Columns, AppError> {
        Ok(Columns::new()
            .set("semester_id", input.semester_id)
            .set("subject_type_id", input.subject_type_id)
            .set("name", input.name.as_str())
            .set("abbr", input.abbr.as_str())
            .set("code", input.code.as_str())
            .set("credits", input.credits)
            .set_some("status", input.status))
    }
}

/// Seeded lookup; never written through the API.
pub struct SubjectTypes;

#[async_trait]
impl Resource for SubjectTypes {
    type Row = SubjectType;
    type Input = NoInput;

    const TABLE: &'static str = "subject_types";
    const LABEL: &'static str = "Subject Type";
    const LIST_KEY: &'static str = "subjectTypes";
    const COUNT_KEY: &'static str = "subjectTypeCount";
    const ORDER_BY: &'static str = "t.id ASC";
    const PAGINATED: bool = false;

    fn id_of(_input: &NoInput) -> Option<i64> {
        None
    }

    fn columns(
        _input: &NoInput,
        _principal: &Principal,
        _id: Option<i64>,
    ) -> Result<Columns, AppError> {
        Err(AppError::rejected("Subject Types Are Read Only."))
    }
}
