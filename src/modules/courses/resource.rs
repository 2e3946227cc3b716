use async_trait::async_trait;
use sqlx::PgConnection;

use campus_auth::Principal;
use campus_core::filter::{SearchColumn, like_if_value};
use campus_core::{AppError, Columns, Filter};

use crate::crud::{DeletionPolicy, ListParams, Resource};
use crate::modules::courses::model::{
    Course, SaveCourseDto, SaveStudentDocumentDto, StudentDocument,
};

pub struct Courses;

#[async_trait]
impl Resource for Courses {
    type Row = Course;
    type Input = SaveCourseDto;

    const TABLE: &'static str = "courses";
    const LABEL: &'static str = "Course";
    const LIST_KEY: &'static str = "courses";
    const COUNT_KEY: &'static str = "courseCount";
    const SELECT: &'static str = "t.*, ARRAY(SELECT csd.document_id FROM course_student_documents csd \
         WHERE csd.course_id = t.id ORDER BY csd.document_id) AS document_ids";

    fn compose(
        params: &ListParams,
        filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        like_if_value(filter, &[SearchColumn::Single("name")], params.search_text());
        Ok(())
    }

    fn id_of(input: &SaveCourseDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveCourseDto,
        _principal: &Principal,
        _id: Option<i64>,
    ) -> Result<Columns, AppError> {
        Ok(Columns::new()
            .set("name", input.name.as_str())
            .set("abbr", input.abbr.as_str())
            .set("duration", input.duration)
            .set("description", input.description.clone())
            .set("program_outcome", input.program_outcome.clone())
            .set("departmental_strength", input.departmental_strength.clone())
            .set("about_facility", input.about_facility.clone())
            .set("eligibility", input.eligibility.clone())
            .set("significance", input.significance.clone())
            .set("vision", input.vision.clone())
            .set("mission", input.mission.clone())
            .set("technical_activities", input.technical_activities.clone())
            .set_some("status", input.status))
    }

    async fn after_save(
        conn: &mut PgConnection,
        id: i64,
        input: &SaveCourseDto,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM course_student_documents WHERE course_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if !input.documents.is_empty() {
            sqlx::query(
                r#"INSERT INTO course_student_documents (course_id, document_id)
                   SELECT $1, d FROM UNNEST($2::BIGINT[]) AS d
                   ON CONFLICT DO NOTHING"#,
            )
            .bind(id)
            .bind(&input.documents)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }
}

/// Document master; rows are deactivated instead of removed.
pub struct StudentDocuments;

#[async_trait]
impl Resource for StudentDocuments {
    type Row = StudentDocument;
    type Input = SaveStudentDocumentDto;

    const TABLE: &'static str = "student_documents";
    const LABEL: &'static str = "Student Document";
    const LIST_KEY: &'static str = "studentDocuments";
    const COUNT_KEY: &'static str = "studentDocumentCount";
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

    fn id_of(input: &SaveStudentDocumentDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveStudentDocumentDto,
        _principal: &Principal,
        _id: Option<i64>,
    ) -> Result<Columns, AppError> {
        Ok(Columns::new()
            .set("name", input.name.as_str())
            .set_some("status", input.status))
    }
}

/// Soft-deleted masters list only active rows unless `showAll=1`.
pub(crate) fn active_unless_show_all(params: &ListParams, filter: &mut Filter) {
    if params.flag("showAll") != Some(true) {
        filter.where_eq("status", true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_auth::PortalRole;
    use campus_core::SqlValue;
    use sqlx::{Postgres, QueryBuilder};

    fn admin() -> Principal {
        Principal {
            id: 1,
            role: PortalRole::Admin,
            email: "admin@example.com".to_string(),
        }
    }

    fn render(filter: &Filter) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("");
        filter.push_where(&mut qb);
        qb.sql().to_string()
    }

    #[test]
    fn test_course_search_filters_by_name() {
        let params: ListParams = [("searchText", "Engineering")].into_iter().collect();
        let mut filter = Filter::new();
        Courses::compose(&params, &mut filter, &admin()).unwrap();
        assert_eq!(render(&filter), " WHERE (t.name ILIKE $1)");
    }

    #[test]
    fn test_student_documents_default_to_active() {
        let mut filter = Filter::new();
        StudentDocuments::compose(&ListParams::default(), &mut filter, &admin()).unwrap();
        assert_eq!(render(&filter), " WHERE t.status = $1");

        let params: ListParams = [("showAll", "1")].into_iter().collect();
        let mut filter = Filter::new();
        StudentDocuments::compose(&params, &mut filter, &admin()).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_course_columns_keep_status_when_absent() {
        let input: SaveCourseDto = serde_json::from_value(serde_json::json!({
            "name": " Computer Engineering ",
            "abbr": "CE",
            "duration": 4
        }))
        .unwrap();

        let columns = Courses::columns(&input, &admin(), None).unwrap();
        assert_eq!(
            columns.get("name"),
            Some(&SqlValue::Text(Some("Computer Engineering".into())))
        );
        assert!(columns.get("status").is_none());
        assert!(input.documents.is_empty());
    }
}
