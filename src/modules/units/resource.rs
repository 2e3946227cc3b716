use async_trait::async_trait;
use sqlx::PgConnection;

use campus_auth::Principal;
use campus_core::filter::{SearchColumn, like_if_value};
use campus_core::{AppError, Columns, Filter};

use crate::crud::{ListParams, Resource};
use crate::modules::units::model::{
    SaveUnitDto, SaveUnitMaterialDto, SaveUnitQuizDto, Unit, UnitMaterial, UnitQuiz,
};

fn search_name(params: &ListParams, filter: &mut Filter) {
    like_if_value(filter, &[SearchColumn::Single("name")], params.search_text());
}

pub struct Units;

#[async_trait]
impl Resource for Units {
    type Row = Unit;
    type Input = SaveUnitDto;

    const TABLE: &'static str = "units";
    const LABEL: &'static str = "Unit";
    const LIST_KEY: &'static str = "units";
    const COUNT_KEY: &'static str = "unitCount";
    const ORDER_BY: &'static str = "t.number ASC";

    fn compose(
        params: &ListParams,
        filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        filter.where_eq("subject_id", params.require_int("subjectId", "Send Subject ID")?);
        search_name(params, filter);
        Ok(())
    }

    fn id_of(input: &SaveUnitDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveUnitDto,
        _principal: &Principal,
        _id: Option<i64>,
    ) -> Result<Columns, AppError> {
        Ok(Columns::new()
            .set("subject_id", input.subject_id)
            .set("name", input.name.as_str())
            .set("number", input.number)
            .set("description", input.description.clone())
            .set_some("status", input.status))
    }
}

pub struct UnitMaterials;

#[async_trait]
impl Resource for UnitMaterials {
    type Row = UnitMaterial;
    type Input = SaveUnitMaterialDto;

    const TABLE: &'static str = "unit_materials";
    const LABEL: &'static str = "Unit Material";
    const LIST_KEY: &'static str = "unitMaterials";
    const COUNT_KEY: &'static str = "unitMaterialsCount";

    fn compose(
        params: &ListParams,
        filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        filter.where_eq("unit_id", params.require_int("unitId", "Send Unit ID")?);
        search_name(params, filter);
        Ok(())
    }

    fn id_of(input: &SaveUnitMaterialDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveUnitMaterialDto,
        _principal: &Principal,
        _id: Option<i64>,
    ) -> Result<Columns, AppError> {
        Ok(Columns::new()
            .set("unit_id", input.unit_id)
            .set("name", input.name.as_str())
            .set("link", input.link.as_str())
            .set("description", input.description.clone())
            .set_some("status", input.status))
    }
}

pub struct UnitQuizzes;

#[async_trait]
impl Resource for UnitQuizzes {
    type Row = UnitQuiz;
    type Input = SaveUnitQuizDto;

    const TABLE: &'static str = "unit_quizzes";
    const LABEL: &'static str = "Unit Quiz";
    const LIST_KEY: &'static str = "unitQuizzes";
    const COUNT_KEY: &'static str = "unitQuizzesCount";
    const SELECT: &'static str = r#"t.*, COALESCE((
            SELECT json_agg(json_build_object(
                'id', q.id,
                'question', q.question,
                'questionOrder', q.question_order,
                'options', COALESCE((
                    SELECT json_agg(json_build_object(
                        'id', o.id, 'value', o.value, 'isCorrect', o.is_correct
                    ) ORDER BY o.id)
                    FROM unit_quiz_question_options o
                    WHERE o.unit_quiz_question_id = q.id
                ), '[]'::json)
            ) ORDER BY q.question_order)
            FROM unit_quiz_questions q
            WHERE q.unit_quiz_id = t.id
        ), '[]'::json) AS questions"#;

    fn compose(
        params: &ListParams,
        filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        filter.where_eq("unit_id", params.require_int("unitId", "Send Unit ID")?);
        search_name(params, filter);
        Ok(())
    }

    fn id_of(input: &SaveUnitQuizDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveUnitQuizDto,
        _principal: &Principal,
        _id: Option<i64>,
    ) -> Result<Columns, AppError> {
        Ok(Columns::new()
            .set("unit_id", input.unit_id)
            .set("name", input.name.as_str())
            .set("description", input.description.clone())
            .set_some("status", input.status))
    }

    /// Questions are replaced wholesale; their options go with them.
    async fn after_save(
        conn: &mut PgConnection,
        id: i64,
        input: &SaveUnitQuizDto,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM unit_quiz_questions WHERE unit_quiz_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        for (order, question) in input.questions.iter().enumerate() {
            let question_id: i64 = sqlx::query_scalar(
                r#"INSERT INTO unit_quiz_questions (unit_quiz_id, question, question_order)
                   VALUES ($1, $2, $3)
                   RETURNING id"#,
            )
            .bind(id)
            .bind(question.question.as_str())
            .bind(order as i64)
            .fetch_one(&mut *conn)
            .await?;

            for option in &question.options {
                let Some(value) = option.value.as_deref().filter(|v| !v.trim().is_empty()) else {
                    continue;
                };
                sqlx::query(
                    r#"INSERT INTO unit_quiz_question_options (unit_quiz_question_id, value, is_correct)
                       VALUES ($1, $2, $3)"#,
                )
                .bind(question_id)
                .bind(value)
                .bind(option.is_correct)
                .execute(&mut *conn)
                .await?;
            }
        }

        Ok(())
    }
}
