use async_trait::async_trait;

use campus_auth::{PortalRole, Principal};
use campus_core::filter::{SearchColumn, like_if_value, where_if_value};
use campus_core::{AppError, Columns, Filter};

use crate::crud::{Access, ListParams, Resource};
use crate::modules::events::model::{ApprovalStatus, Event, SaveEventDto};

pub const INVALID_DATES: &str = "End Date Cannot Be Before Start Date.";

pub struct Events;

#[async_trait]
impl Resource for Events {
    type Row = Event;
    type Input = SaveEventDto;

    const TABLE: &'static str = "events";
    const LABEL: &'static str = "Event";
    const LIST_KEY: &'static str = "events";
    const COUNT_KEY: &'static str = "eventCount";
    const SELECT: &'static str = r#"t.*, h.first_name || ' ' || h.last_name AS event_head_name,
        COALESCE((
            SELECT json_agg(json_build_object(
                'id', eo.id,
                'teacherId', eo.teacher_id,
                'teacherName', ot.first_name || ' ' || ot.last_name,
                'approvalStatus', eo.approval_status
            ) ORDER BY eo.id)
            FROM event_organisers eo
            JOIN teachers ot ON ot.id = eo.teacher_id
            WHERE eo.event_id = t.id
        ), '[]'::json) AS organisers,
        COALESCE((
            SELECT json_agg(json_build_object(
                'id', ep.id,
                'teacherId', ep.teacher_id,
                'studentId', ep.student_id,
                'name', COALESCE(pt.first_name || ' ' || pt.last_name,
                                 ps.first_name || ' ' || ps.last_name)
            ) ORDER BY ep.id)
            FROM event_participants ep
            LEFT JOIN teachers pt ON pt.id = ep.teacher_id
            LEFT JOIN students ps ON ps.id = ep.student_id
            WHERE ep.event_id = t.id
        ), '[]'::json) AS participants"#;
    const JOINS: &'static str = "JOIN teachers h ON h.id = t.event_head_id";
    const ORDER_BY: &'static str = "t.start_date DESC NULLS LAST, t.id DESC";

    fn compose(
        params: &ListParams,
        filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        where_if_value(filter, "approval_status", params.get("approvalStatus"), |raw| {
            raw.parse::<ApprovalStatus>()
                .ok()
                .map(|status| status.as_str())
        });
        like_if_value(filter, &[SearchColumn::Single("name")], params.search_text());
        Ok(())
    }

    /// Only the event head may change or delete an event.
    fn scope(filter: &mut Filter, principal: &Principal, access: Access) {
        if access == Access::Write && principal.role == PortalRole::Teacher {
            filter.where_eq("event_head_id", principal.id);
        }
    }

    fn id_of(input: &SaveEventDto) -> Option<i64> {
        input.id
    }

    fn columns(
        input: &SaveEventDto,
        principal: &Principal,
        id: Option<i64>,
    ) -> Result<Columns, AppError> {
        if let (Some(start), Some(end)) = (input.start_date, input.end_date)
            && end < start
        {
            return Err(AppError::rejected(INVALID_DATES));
        }

        let mut columns = Columns::new()
            .set("name", input.name.as_str())
            .set("description", input.description.clone())
            .set("venue", input.venue.clone())
            .set("start_date", input.start_date)
            .set("end_date", input.end_date)
            .set_some("status", input.status);

        if id.is_none() {
            columns.insert("event_head_id", principal.id);
            columns.insert("approval_status", ApprovalStatus::Pending.as_str());
        }
        Ok(columns)
    }
}
