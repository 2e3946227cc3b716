use sqlx::PgPool;
use tracing::{info, instrument};

use campus_core::AppError;

use crate::modules::events::model::ApprovalStatus;

pub const HEAD_ONLY: &str = "Only The Event Head Can Approve Organisers.";

/// Outcome of an operation on a row that may not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Yes,
    No,
}

pub struct EventService;

impl EventService {
    #[instrument(skip(db))]
    pub async fn set_approval(
        db: &PgPool,
        event_id: i64,
        status: ApprovalStatus,
    ) -> Result<Found, AppError> {
        let result = sqlx::query(
            "UPDATE events SET approval_status = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(status.as_str())
        .bind(event_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(Found::No);
        }
        info!(event_id, %status, "Event approval status changed");
        Ok(Found::Yes)
    }

    async fn event_exists(db: &PgPool, event_id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM events WHERE id = $1 AND status = TRUE)",
        )
        .bind(event_id)
        .fetch_one(db)
        .await?;
        Ok(exists)
    }

    /// Asking twice is a no-op.
    #[instrument(skip(db))]
    pub async fn join_organisers(
        db: &PgPool,
        teacher_id: i64,
        event_id: i64,
    ) -> Result<Found, AppError> {
        if !Self::event_exists(db, event_id).await? {
            return Ok(Found::No);
        }

        sqlx::query(
            r#"INSERT INTO event_organisers (event_id, teacher_id)
               VALUES ($1, $2)
               ON CONFLICT (event_id, teacher_id) DO NOTHING"#,
        )
        .bind(event_id)
        .bind(teacher_id)
        .execute(db)
        .await?;

        Ok(Found::Yes)
    }

    #[instrument(skip(db))]
    pub async fn join_participants(
        db: &PgPool,
        teacher_id: i64,
        event_id: i64,
    ) -> Result<Found, AppError> {
        if !Self::event_exists(db, event_id).await? {
            return Ok(Found::No);
        }

        sqlx::query(
            r#"INSERT INTO event_participants (event_id, teacher_id)
               VALUES ($1, $2)
               ON CONFLICT (event_id, teacher_id) WHERE teacher_id IS NOT NULL DO NOTHING"#,
        )
        .bind(event_id)
        .bind(teacher_id)
        .execute(db)
        .await?;

        Ok(Found::Yes)
    }

    /// A participant may leave; the event head may remove anyone.
    #[instrument(skip(db))]
    pub async fn remove_participant(
        db: &PgPool,
        teacher_id: i64,
        participant_id: i64,
    ) -> Result<Found, AppError> {
        let result = sqlx::query(
            r#"DELETE FROM event_participants ep
               WHERE ep.id = $1
                 AND (ep.teacher_id = $2
                      OR EXISTS (SELECT 1 FROM events e
                                 WHERE e.id = ep.event_id AND e.event_head_id = $2))"#,
        )
        .bind(participant_id)
        .bind(teacher_id)
        .execute(db)
        .await?;

        Ok(if result.rows_affected() == 0 {
            Found::No
        } else {
            Found::Yes
        })
    }

    #[instrument(skip(db))]
    pub async fn set_organiser_approval(
        db: &PgPool,
        teacher_id: i64,
        organiser_id: i64,
        status: ApprovalStatus,
    ) -> Result<Found, AppError> {
        let head_id: Option<i64> = sqlx::query_scalar(
            r#"SELECT e.event_head_id FROM event_organisers eo
               JOIN events e ON e.id = eo.event_id
               WHERE eo.id = $1"#,
        )
        .bind(organiser_id)
        .fetch_optional(db)
        .await?;

        match head_id {
            None => return Ok(Found::No),
            Some(head_id) if head_id != teacher_id => return Err(AppError::rejected(HEAD_ONLY)),
            Some(_) => {}
        }

        sqlx::query("UPDATE event_organisers SET approval_status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(organiser_id)
            .execute(db)
            .await?;

        info!(organiser_id, %status, "Event organiser approval status changed");
        Ok(Found::Yes)
    }
}
