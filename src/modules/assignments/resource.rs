use async_trait::async_trait;
use sqlx::PgConnection;

use campus_auth::Principal;
use campus_core::filter::{SearchColumn, like_if_value, nested_like_if_value, where_if_value};
use campus_core::normalize::int_or_none;
use campus_core::{AppError, Columns, Filter, Relation};

use crate::crud::{Access, ListParams, Resource};
use crate::modules::assignments::model::{Assignment, SaveAssignmentDto};

/// Assignments belong to the teacher who created them; every query is
/// limited to the signed-in teacher's rows.
pub struct Assignments;

#[async_trait]
impl Resource for Assignments {
    type Row = Assignment;
    type Input = SaveAssignmentDto;

    const TABLE: &'static str = "assignments";
    const LABEL: &'static str = "Assignment";
    const LIST_KEY: &'static str = "assignments";
    const COUNT_KEY: &'static str = "assignmentCount";
    const SELECT: &'static str = r#"t.*, s.name AS subject_name, d.name AS division_name,
        COALESCE((
            SELECT json_agg(json_build_object(
                'id', q.id, 'question', q.question, 'questionOrder', q.question_order
            ) ORDER BY q.question_order)
            FROM assignment_questions q
            WHERE q.assignment_id = t.id AND q.status = TRUE
        ), '[]'::json) AS questions,
        COALESCE((
            SELECT json_agg(json_build_object('id', m.id, 'materialUrl', m.material_url)
                            ORDER BY m.id)
            FROM assignment_materials m
            WHERE m.assignment_id = t.id AND m.status = TRUE
        ), '[]'::json) AS materials"#;
    const JOINS: &'static str =
        "JOIN subjects s ON s.id = t.subject_id JOIN divisions d ON d.id = t.division_id";

    fn compose(
        params: &ListParams,
        filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        where_if_value(filter, "subject_id", params.get("subjectId"), int_or_none);
        where_if_value(filter, "division_id", params.get("divisionId"), int_or_none);
        like_if_value(filter, &[SearchColumn::Single("name")], params.search_text());
        nested_like_if_value(
            filter,
            &[(Relation::parent("subjects", "subject_id"), "name")],
            params.search_text(),
        );
        Ok(())
    }

    fn scope(filter: &mut Filter, principal: &Principal, _access: Access) {
        filter.where_eq("teacher_id", principal.id);
    }

    fn id_of(input: &SaveAssignmentDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveAssignmentDto,
        principal: &Principal,
        _id: Option<i64>,
    ) -> Result<Columns, AppError> {
        Ok(Columns::new()
            .set("teacher_id", principal.id)
            .set("subject_id", input.subject_id)
            .set("division_id", input.division_id)
            .set("name", input.name.as_str())
            .set("description", input.description.clone())
            .set("due_date", input.due_date)
            .set_some("status", input.status))
    }

    /// Questions are deactivated and then revived or added in order;
    /// materials are deactivated and re-added.
    async fn after_save(
        conn: &mut PgConnection,
        id: i64,
        input: &SaveAssignmentDto,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE assignment_questions SET status = FALSE WHERE assignment_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        for (order, question) in input.questions.iter().enumerate() {
            let order = order as i64;
            let updated = match question.db_id {
                Some(question_id) => {
                    sqlx::query(
                        r#"UPDATE assignment_questions
                           SET question = $1, question_order = $2, status = TRUE
                           WHERE id = $3 AND assignment_id = $4"#,
                    )
                    .bind(question.name.as_str())
                    .bind(order)
                    .bind(question_id)
                    .bind(id)
                    .execute(&mut *conn)
                    .await?
                    .rows_affected()
                }
                None => 0,
            };

            if updated == 0 {
                sqlx::query(
                    r#"INSERT INTO assignment_questions (assignment_id, question, question_order)
                       VALUES ($1, $2, $3)"#,
                )
                .bind(id)
                .bind(question.name.as_str())
                .bind(order)
                .execute(&mut *conn)
                .await?;
            }
        }

        sqlx::query("UPDATE assignment_materials SET status = FALSE WHERE assignment_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        let urls: Vec<&str> = input
            .materials
            .iter()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .collect();
        if !urls.is_empty() {
            sqlx::query(
                r#"INSERT INTO assignment_materials (assignment_id, material_url)
                   SELECT $1, u FROM UNNEST($2::TEXT[]) AS u"#,
            )
            .bind(id)
            .bind(&urls)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }
}
