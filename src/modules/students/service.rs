use sqlx::PgPool;
use tracing::instrument;

use campus_core::AppError;

use crate::modules::students::model::{StudentBatch, StudentSubject, StudentUnit};

/// Curriculum as seen by a student: only semesters mapped to the student's
/// batch are visible.
pub struct StudentPortalService;

impl StudentPortalService {
    #[instrument(skip(db))]
    pub async fn batch_of(db: &PgPool, student_id: i64) -> Result<Option<StudentBatch>, AppError> {
        let batch = sqlx::query_as::<_, StudentBatch>(
            r#"SELECT b.id, b.year, c.id AS course_id, c.name AS course_name, c.abbr AS course_abbr,
                      COALESCE((
                          SELECT json_agg(json_build_object(
                              'id', sem.id,
                              'semNumber', sem.sem_number,
                              'duration', sem.duration,
                              'subjects', COALESCE((
                                  SELECT json_agg(json_build_object(
                                      'id', sub.id,
                                      'subjectTypeId', sub.subject_type_id,
                                      'name', sub.name,
                                      'abbr', sub.abbr,
                                      'code', sub.code,
                                      'credits', sub.credits
                                  ) ORDER BY sub.name)
                                  FROM subjects sub
                                  WHERE sub.semester_id = sem.id AND sub.status = TRUE
                              ), '[]'::json)
                          ) ORDER BY sem.sem_number)
                          FROM batch_semester_maps m
                          JOIN semesters sem ON sem.id = m.semester_id
                          WHERE m.batch_id = b.id AND sem.status = TRUE
                      ), '[]'::json) AS accessible_semesters
               FROM students s
               JOIN batches b ON b.id = s.batch_id
               JOIN courses c ON c.id = b.course_id
               WHERE s.id = $1"#,
        )
        .bind(student_id)
        .fetch_optional(db)
        .await?;

        Ok(batch)
    }

    #[instrument(skip(db))]
    pub async fn subject_for(
        db: &PgPool,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Option<StudentSubject>, AppError> {
        let subject = sqlx::query_as::<_, StudentSubject>(
            r#"SELECT s.id, s.semester_id, st.name AS subject_type_name, s.name, s.abbr, s.code,
                      s.credits,
                      COALESCE((
                          SELECT json_agg(json_build_object(
                              'id', u.id, 'name', u.name, 'number', u.number,
                              'description', u.description
                          ) ORDER BY u.number)
                          FROM units u
                          WHERE u.subject_id = s.id AND u.status = TRUE
                      ), '[]'::json) AS units
               FROM subjects s
               JOIN subject_types st ON st.id = s.subject_type_id
               WHERE s.id = $1 AND s.status = TRUE
                 AND EXISTS (
                     SELECT 1 FROM batch_semester_maps m
                     JOIN students stu ON stu.batch_id = m.batch_id
                     WHERE stu.id = $2 AND m.semester_id = s.semester_id
                 )"#,
        )
        .bind(subject_id)
        .bind(student_id)
        .fetch_optional(db)
        .await?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn unit_for(
        db: &PgPool,
        student_id: i64,
        unit_id: i64,
    ) -> Result<Option<StudentUnit>, AppError> {
        let unit = sqlx::query_as::<_, StudentUnit>(
            r#"SELECT u.id, u.subject_id, u.name, u.number, u.description,
                      COALESCE((
                          SELECT json_agg(json_build_object(
                              'id', um.id, 'name', um.name, 'link', um.link,
                              'description', um.description
                          ) ORDER BY um.id)
                          FROM unit_materials um
                          WHERE um.unit_id = u.id AND um.status = TRUE
                      ), '[]'::json) AS materials,
                      COALESCE((
                          SELECT json_agg(json_build_object(
                              'id', uq.id, 'name', uq.name, 'description', uq.description
                          ) ORDER BY uq.id)
                          FROM unit_quizzes uq
                          WHERE uq.unit_id = u.id AND uq.status = TRUE
                      ), '[]'::json) AS quizzes
               FROM units u
               JOIN subjects s ON s.id = u.subject_id
               WHERE u.id = $1 AND u.status = TRUE AND s.status = TRUE
                 AND EXISTS (
                     SELECT 1 FROM batch_semester_maps m
                     JOIN students stu ON stu.batch_id = m.batch_id
                     WHERE stu.id = $2 AND m.semester_id = s.semester_id
                 )"#,
        )
        .bind(unit_id)
        .bind(student_id)
        .fetch_optional(db)
        .await?;

        Ok(unit)
    }
}
