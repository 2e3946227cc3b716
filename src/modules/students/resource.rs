use async_trait::async_trait;
use sqlx::PgConnection;

use campus_auth::Principal;
use campus_core::filter::{like_if_value, nested_like_if_value, where_if_value};
use campus_core::normalize::int_or_none;
use campus_core::{AppError, Columns, Filter, Predicate, Relation};

use crate::crud::{ListParams, Resource};
use crate::modules::students::model::{SaveStudentDto, Student};
use crate::modules::teachers::resource::{PERSON_SEARCH, password_column};

pub struct Students;

#[async_trait]
impl Resource for Students {
    type Row = Student;
    type Input = SaveStudentDto;

    const TABLE: &'static str = "students";
    const LABEL: &'static str = "Student";
    const LIST_KEY: &'static str = "students";
    const COUNT_KEY: &'static str = "studentCount";
    const SELECT: &'static str = r#"t.id, t.course_id, c.name AS course_name, t.batch_id,
        b.year AS batch_year, t.division_id, d.name AS division_name, t.roll_number,
        t.first_name, t.last_name, t.email, t.gender, t.profile_img, t.address, t.status,
        COALESCE((
            SELECT json_agg(json_build_object('id', u.id, 'documentId', u.document_id, 'url', u.url)
                            ORDER BY u.id)
            FROM uploaded_student_documents u
            WHERE u.student_id = t.id AND u.status = TRUE
        ), '[]'::json) AS documents,
        t.created_at, t.updated_at"#;
    const JOINS: &'static str = "JOIN courses c ON c.id = t.course_id \
         JOIN batches b ON b.id = t.batch_id \
         JOIN divisions d ON d.id = t.division_id";
    const ORDER_BY: &'static str = "t.roll_number ASC";

    fn compose(
        params: &ListParams,
        filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        where_if_value(filter, "course_id", params.get("courseId"), int_or_none);
        where_if_value(filter, "batch_id", params.get("batchId"), int_or_none);
        where_if_value(filter, "division_id", params.get("divisionId"), int_or_none);

        like_if_value(filter, PERSON_SEARCH, params.search_text());
        nested_like_if_value(
            filter,
            &[(Relation::parent("divisions", "division_id"), "name")],
            params.search_text(),
        );
        if let Some(search) = params.search_text().map(str::trim).filter(|s| !s.is_empty()) {
            filter.extend_any([Predicate::contains("roll_number", search)]);
        }
        Ok(())
    }

    fn id_of(input: &SaveStudentDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveStudentDto,
        _principal: &Principal,
        id: Option<i64>,
    ) -> Result<Columns, AppError> {
        let columns = Columns::new()
            .set("course_id", input.course_id)
            .set("batch_id", input.batch_id)
            .set("division_id", input.division_id)
            .set("roll_number", input.roll_number.as_str())
            .set("first_name", input.first_name.as_str())
            .set("last_name", input.last_name.as_str())
            .set("email", input.email.trim().to_lowercase())
            .set("gender", input.gender.as_str())
            .set("profile_img", input.profile_img.clone())
            .set("address", input.address.clone())
            .set_some("status", input.status);

        password_column(columns, input.password.as_deref(), id)
    }

    async fn after_save(
        conn: &mut PgConnection,
        id: i64,
        input: &SaveStudentDto,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE uploaded_student_documents SET status = FALSE WHERE student_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        for document in &input.documents {
            let Some(url) = document.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
            else {
                continue;
            };
            sqlx::query(
                r#"INSERT INTO uploaded_student_documents (student_id, document_id, url)
                   VALUES ($1, $2, $3)"#,
            )
            .bind(id)
            .bind(document.document_id)
            .bind(url)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }
}
