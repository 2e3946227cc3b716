use async_trait::async_trait;
use sqlx::PgConnection;

use campus_auth::Principal;
use campus_core::filter::{SearchColumn, like_if_value, where_if_value};
use campus_core::normalize::int_or_none;
use campus_core::{AppError, Columns, Filter};

use crate::crud::{ListParams, Resource};
use crate::modules::batches::model::{Batch, Division, SaveBatchDto, SaveDivisionDto};

pub const BATCH_EXISTS: &str = "Batch Already Exists.";

pub struct Batches;

#[async_trait]
impl Resource for Batches {
    type Row = Batch;
    type Input = SaveBatchDto;

    const TABLE: &'static str = "batches";
    const LABEL: &'static str = "Batch";
    const LIST_KEY: &'static str = "batches";
    const COUNT_KEY: &'static str = "batchCount";
    const SELECT: &'static str = r#"t.*, c.name AS course_name, COALESCE((
            SELECT json_agg(json_build_object(
                'id', s.id, 'semNumber', s.sem_number, 'duration', s.duration
            ) ORDER BY s.sem_number)
            FROM batch_semester_maps m
            JOIN semesters s ON s.id = m.semester_id
            WHERE m.batch_id = t.id
        ), '[]'::json) AS accessible_semesters"#;
    const JOINS: &'static str = "JOIN courses c ON c.id = t.course_id";
    const ORDER_BY: &'static str = "t.year DESC, t.id DESC";

    fn compose(
        params: &ListParams,
        filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        where_if_value(filter, "course_id", params.get("courseId"), int_or_none);
        where_if_value(filter, "year", params.get("year"), int_or_none);
        Ok(())
    }

    fn id_of(input: &SaveBatchDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveBatchDto,
        _principal: &Principal,
        _id: Option<i64>,
    ) -> Result<Columns, AppError> {
        Ok(Columns::new()
            .set("course_id", input.course_id)
            .set("year", input.year)
            .set_some("status", input.status))
    }

    async fn before_save(
        conn: &mut PgConnection,
        input: &SaveBatchDto,
        id: Option<i64>,
    ) -> Result<(), AppError> {
        if id.is_some() {
            return Ok(());
        }

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM batches WHERE course_id = $1 AND year = $2)",
        )
        .bind(input.course_id)
        .bind(input.year)
        .fetch_one(&mut *conn)
        .await?;

        if exists {
            return Err(AppError::rejected(BATCH_EXISTS));
        }
        Ok(())
    }

    async fn after_save(
        conn: &mut PgConnection,
        id: i64,
        input: &SaveBatchDto,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM batch_semester_maps WHERE batch_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if !input.accessible_semester_ids.is_empty() {
            sqlx::query(
                r#"INSERT INTO batch_semester_maps (batch_id, semester_id)
                   SELECT $1, s FROM UNNEST($2::BIGINT[]) AS s
                   ON CONFLICT DO NOTHING"#,
            )
            .bind(id)
            .bind(&input.accessible_semester_ids)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }
}

pub struct Divisions;

#[async_trait]
impl Resource for Divisions {
    type Row = Division;
    type Input = SaveDivisionDto;

    const TABLE: &'static str = "divisions";
    const LABEL: &'static str = "Division";
    const LIST_KEY: &'static str = "divisions";
    const COUNT_KEY: &'static str = "divisionCount";
    const ORDER_BY: &'static str = "t.name ASC";

    fn compose(
        params: &ListParams,
        filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        filter.where_eq("batch_id", params.require_int("batchId", "Send Batch ID")?);
        like_if_value(filter, &[SearchColumn::Single("name")], params.search_text());
        Ok(())
    }

    fn id_of(input: &SaveDivisionDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveDivisionDto,
        _principal: &Principal,
        _id: Option<i64>,
    ) -> Result<Columns, AppError> {
        Ok(Columns::new()
            .set("batch_id", input.batch_id)
            .set("name", input.name.as_str())
            .set_some("status", input.status))
    }
}
