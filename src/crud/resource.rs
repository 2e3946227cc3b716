use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection};
use validator::Validate;

use campus_auth::Principal;
use campus_core::{AppError, Columns, Filter};

use crate::crud::params::ListParams;

/// What happens to a row on `DELETE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionPolicy {
    /// The row is removed; children go with it through `ON DELETE CASCADE`.
    Hard,
    /// The row stays and `flag` is set to `FALSE`.
    Soft { flag: &'static str },
}

/// Input of a resource that is only ever read.
#[derive(Debug, Deserialize, Validate)]
pub struct NoInput {}

/// Whether a scope is being applied for reading or for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// A table exposed through the generic CRUD service.
///
/// Queries run against `{TABLE} t {JOINS}`; filters, scopes and `SELECT`
/// expressions refer to the main table as `t`.
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    type Row: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin + 'static;
    type Input: DeserializeOwned + Validate + Send + Sync + 'static;

    const TABLE: &'static str;
    /// Singular display name used in messages, e.g. "Unit Quiz".
    const LABEL: &'static str;
    const LIST_KEY: &'static str;
    const COUNT_KEY: &'static str;
    const DELETION: DeletionPolicy = DeletionPolicy::Hard;
    const SELECT: &'static str = "t.*";
    const JOINS: &'static str = "";
    const ORDER_BY: &'static str = "t.id DESC";
    /// Unpaginated resources return every matching row.
    const PAGINATED: bool = true;

    /// Adds list filters from the query string.
    ///
    /// A missing mandatory parameter is reported as a rejection.
    fn compose(
        _params: &ListParams,
        _filter: &mut Filter,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        Ok(())
    }

    /// Restricts every query to the rows `principal` may see or change.
    fn scope(_filter: &mut Filter, _principal: &Principal, _access: Access) {}

    fn id_of(input: &Self::Input) -> Option<i64>;

    /// Column assignments for the insert (`id` absent) or update.
    fn columns(
        input: &Self::Input,
        principal: &Principal,
        id: Option<i64>,
    ) -> Result<Columns, AppError>;

    /// Runs inside the save transaction before the row is written.
    async fn before_save(
        _conn: &mut PgConnection,
        _input: &Self::Input,
        _id: Option<i64>,
    ) -> Result<(), AppError> {
        Ok(())
    }

    /// Runs inside the save transaction once the row id is known; used to
    /// rewrite child rows.
    async fn after_save(
        _conn: &mut PgConnection,
        _id: i64,
        _input: &Self::Input,
        _principal: &Principal,
    ) -> Result<(), AppError> {
        Ok(())
    }

    fn not_found_message() -> String {
        format!("{} Does Not Exist.", Self::LABEL)
    }

    fn saved_message() -> String {
        format!("{} Saved.", Self::LABEL)
    }
}
