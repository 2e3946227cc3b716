use sqlx::PgPool;
use tracing::{info, instrument};

use campus_core::AppError;

use crate::crud::service::constraint_error;
use crate::modules::teachers::model::{
    DivisionSubjectTeacher, SaveDivisionSubjectTeacherDto, TeacherDivision, TeacherSubject,
};
use crate::modules::teachers::resource::Teachers;

pub struct DivisionSubjectTeacherService;

impl DivisionSubjectTeacherService {
    #[instrument(skip(db))]
    pub async fn list_by_division(
        db: &PgPool,
        division_id: i64,
    ) -> Result<Vec<DivisionSubjectTeacher>, AppError> {
        let links = sqlx::query_as::<_, DivisionSubjectTeacher>(
            r#"SELECT dst.id, dst.division_id, dst.subject_id, s.name AS subject_name,
                      dst.teacher_id, t.first_name AS teacher_first_name,
                      t.last_name AS teacher_last_name, dst.status, dst.created_at
               FROM division_subject_teachers dst
               JOIN subjects s ON s.id = dst.subject_id
               JOIN teachers t ON t.id = dst.teacher_id
               WHERE dst.division_id = $1 AND dst.status = TRUE
               ORDER BY s.name ASC"#,
        )
        .bind(division_id)
        .fetch_all(db)
        .await?;

        Ok(links)
    }

    /// Replaces the teacher of a subject in a division. Previous links are
    /// kept as inactive history.
    #[instrument(skip(db))]
    pub async fn assign(db: &PgPool, dto: SaveDivisionSubjectTeacherDto) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query(
            r#"UPDATE division_subject_teachers SET status = FALSE
               WHERE division_id = $1 AND subject_id = $2 AND status = TRUE"#,
        )
        .bind(dto.division_id)
        .bind(dto.subject_id)
        .execute(&mut *tx)
        .await?;

        if let Some(teacher_id) = dto.teacher_id {
            sqlx::query(
                r#"INSERT INTO division_subject_teachers (division_id, subject_id, teacher_id)
                   VALUES ($1, $2, $3)"#,
            )
            .bind(dto.division_id)
            .bind(dto.subject_id)
            .bind(teacher_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| constraint_error::<Teachers>(e.into()))?;
        }

        tx.commit().await?;
        info!(
            division_id = dto.division_id,
            subject_id = dto.subject_id,
            teacher_id = ?dto.teacher_id,
            "Division subject teacher assigned"
        );
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn divisions_of_teacher(
        db: &PgPool,
        teacher_id: i64,
    ) -> Result<Vec<TeacherDivision>, AppError> {
        let divisions = sqlx::query_as::<_, TeacherDivision>(
            r#"SELECT d.id, d.name, b.id AS batch_id, b.year AS batch_year,
                      c.id AS course_id, c.name AS course_name
               FROM divisions d
               JOIN batches b ON b.id = d.batch_id
               JOIN courses c ON c.id = b.course_id
               WHERE EXISTS (
                   SELECT 1 FROM division_subject_teachers dst
                   WHERE dst.division_id = d.id AND dst.teacher_id = $1 AND dst.status = TRUE
               )
               ORDER BY c.name ASC, b.year DESC, d.name ASC"#,
        )
        .bind(teacher_id)
        .fetch_all(db)
        .await?;

        Ok(divisions)
    }

    #[instrument(skip(db))]
    pub async fn subjects_of_teacher(
        db: &PgPool,
        teacher_id: i64,
        division_id: i64,
    ) -> Result<Vec<TeacherSubject>, AppError> {
        let subjects = sqlx::query_as::<_, TeacherSubject>(
            r#"SELECT DISTINCT s.id, s.semester_id, s.name, s.abbr, s.code, s.credits
               FROM subjects s
               JOIN division_subject_teachers dst ON dst.subject_id = s.id
               WHERE dst.division_id = $1 AND dst.teacher_id = $2 AND dst.status = TRUE
               ORDER BY s.name ASC"#,
        )
        .bind(division_id)
        .bind(teacher_id)
        .fetch_all(db)
        .await?;

        Ok(subjects)
    }
}
