use async_trait::async_trait;

use campus_auth::Principal;
use campus_core::{AppError, Columns, Filter};

use crate::crud::{ListParams, Resource};
use crate::modules::semesters::model::{SaveSemesterDto, Semester};

pub struct Semesters;

#[async_trait]
impl Resource for Semesters {
    type Row = Semester;
    type Input = SaveSemesterDto;

    const TABLE: &'static str = "semesters";
    const LABEL: &'static str = "Semester";
    const LIST_KEY: &'static str = "semesters";
    const COUNT_KEY: &'static str = "semesterCount";
    const ORDER_BY: &'static str = "t.sem_number ASC";

    fn compose(
        params: &ListParams,
        filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        let course_id = params.require_int("courseId", "Send Course ID")?;
        filter.where_eq("course_id", course_id);
        Ok(())
    }

    fn id_of(input: &SaveSemesterDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveSemesterDto,
        _principal: &Principal,
        _id: Option<i64>,
    ) -> Result<Columns, AppError> {
        Ok(Columns::new()
            .set("course_id", input.course_id)
            .set("sem_number", input.sem_number)
            .set("duration", input.duration)
            .set_some("status", input.status))
    }
}
