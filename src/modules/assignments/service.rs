use sqlx::PgPool;
use tracing::instrument;

use campus_core::AppError;

use crate::modules::assignments::model::{AssignmentStudent, SubmittedAssignment};

pub struct SubmissionService;

impl SubmissionService {
    /// `None` when the assignment does not belong to `teacher_id`.
    #[instrument(skip(db))]
    pub async fn students_by_assignment(
        db: &PgPool,
        teacher_id: i64,
        assignment_id: i64,
    ) -> Result<Option<Vec<AssignmentStudent>>, AppError> {
        let division_id: Option<i64> = sqlx::query_scalar(
            "SELECT division_id FROM assignments WHERE id = $1 AND teacher_id = $2",
        )
        .bind(assignment_id)
        .bind(teacher_id)
        .fetch_optional(db)
        .await?;

        let Some(division_id) = division_id else {
            return Ok(None);
        };

        let students = sqlx::query_as::<_, AssignmentStudent>(
            r#"SELECT s.id, s.roll_number, s.first_name, s.last_name, s.email,
                      sa.id AS submitted_assignment_id, sa.submitted_at
               FROM students s
               LEFT JOIN submitted_assignments sa
                      ON sa.student_id = s.id AND sa.assignment_id = $1
               WHERE s.division_id = $2 AND s.status = TRUE
               ORDER BY s.roll_number ASC"#,
        )
        .bind(assignment_id)
        .bind(division_id)
        .fetch_all(db)
        .await?;

        Ok(Some(students))
    }

    #[instrument(skip(db))]
    pub async fn submitted_assignment(
        db: &PgPool,
        teacher_id: i64,
        submitted_assignment_id: i64,
    ) -> Result<Option<SubmittedAssignment>, AppError> {
        let submission = sqlx::query_as::<_, SubmittedAssignment>(
            r#"SELECT sa.id, sa.assignment_id, a.name AS assignment_name, sa.student_id,
                      s.roll_number, s.first_name, s.last_name, sa.answer, sa.attachment_url,
                      sa.submitted_at
               FROM submitted_assignments sa
               JOIN assignments a ON a.id = sa.assignment_id
               JOIN students s ON s.id = sa.student_id
               WHERE sa.id = $1 AND a.teacher_id = $2"#,
        )
        .bind(submitted_assignment_id)
        .bind(teacher_id)
        .fetch_optional(db)
        .await?;

        Ok(submission)
    }
}
