use std::marker::PhantomData;

use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::{info, instrument};

use campus_auth::Principal;
use campus_core::{AppError, Columns, Filter, Predicate};

use crate::crud::params::{ListParams, Listing};
use crate::crud::resource::{Access, DeletionPolicy, Resource};
use crate::validator::INCOMPLETE_DETAILS;

pub struct CrudService<R>(PhantomData<R>);

impl<R: Resource> CrudService<R> {
    #[instrument(skip(db, params, principal), fields(table = R::TABLE))]
    pub async fn list(
        db: &PgPool,
        params: &ListParams,
        principal: &Principal,
    ) -> Result<Listing<R::Row>, AppError> {
        let mut filter = Filter::new();
        R::compose(params, &mut filter, principal)?;
        R::scope(&mut filter, principal, Access::Read);

        let mut count_query =
            QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {} t", R::TABLE));
        filter.push_where(&mut count_query);
        let count: i64 = count_query.build_query_scalar().fetch_one(db).await?;

        let mut query = select_query::<R>();
        filter.push_where(&mut query);
        query.push(" ORDER BY ").push(R::ORDER_BY);
        if R::PAGINATED {
            let page = params.page();
            query
                .push(" LIMIT ")
                .push_bind(page.limit())
                .push(" OFFSET ")
                .push_bind(page.offset());
        }

        let items = query.build_query_as::<R::Row>().fetch_all(db).await?;

        Ok(Listing {
            list_key: R::LIST_KEY,
            count_key: R::COUNT_KEY,
            items,
            count,
        })
    }

    #[instrument(skip(db, principal), fields(table = R::TABLE))]
    pub async fn get(
        db: &PgPool,
        id: i64,
        principal: &Principal,
    ) -> Result<Option<R::Row>, AppError> {
        let mut conn = db.acquire().await?;
        fetch_scoped::<R>(&mut conn, id, principal, Access::Read).await
    }

    /// Inserts when the input carries no id, updates otherwise. Child rows
    /// are rewritten in the same transaction.
    #[instrument(skip(db, input, principal), fields(table = R::TABLE))]
    pub async fn save(db: &PgPool, input: R::Input, principal: &Principal) -> Result<i64, AppError> {
        let mut tx = db.begin().await?;
        let existing = R::id_of(&input);

        if let Some(id) = existing {
            if !exists_scoped::<R>(&mut tx, id, principal).await? {
                return Err(AppError::rejected(R::not_found_message()));
            }
        }

        R::before_save(&mut tx, &input, existing).await?;

        let columns = R::columns(&input, principal, existing)?;
        let id = match existing {
            Some(id) => {
                update::<R>(&mut tx, id, columns)
                    .await
                    .map_err(constraint_error::<R>)?;
                id
            }
            None => insert::<R>(&mut tx, columns)
                .await
                .map_err(constraint_error::<R>)?,
        };

        R::after_save(&mut tx, id, &input, principal)
            .await
            .map_err(constraint_error::<R>)?;

        tx.commit().await?;
        info!(id, created = existing.is_none(), "Saved row");
        Ok(id)
    }

    /// Returns the row as it was before deletion, or `None` when it is not
    /// visible to `principal`.
    #[instrument(skip(db, principal), fields(table = R::TABLE))]
    pub async fn delete(
        db: &PgPool,
        id: i64,
        principal: &Principal,
    ) -> Result<Option<R::Row>, AppError> {
        let mut tx = db.begin().await?;

        let filter = deletable_filter::<R>(id, principal);
        let Some(row) = fetch_matching::<R>(&mut tx, &filter).await? else {
            return Ok(None);
        };

        let sql = match R::DELETION {
            DeletionPolicy::Hard => format!("DELETE FROM {} WHERE id = $1", R::TABLE),
            DeletionPolicy::Soft { flag } => format!(
                "UPDATE {} SET {flag} = FALSE, updated_at = NOW() WHERE id = $1",
                R::TABLE
            ),
        };

        sqlx::query(&sql)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|err| in_use_error::<R>(err.into()))?;

        tx.commit().await?;
        info!(id, policy = ?R::DELETION, "Deleted row");
        Ok(Some(row))
    }
}

fn select_query<R: Resource>() -> QueryBuilder<'static, Postgres> {
    let mut sql = format!("SELECT {} FROM {} t", R::SELECT, R::TABLE);
    if !R::JOINS.is_empty() {
        sql.push(' ');
        sql.push_str(R::JOINS);
    }
    QueryBuilder::new(sql)
}

/// The primary key lives under its own key so a scope on `id` is kept.
fn scoped_filter<R: Resource>(id: i64, principal: &Principal, access: Access) -> Filter {
    let mut filter = Filter::new();
    R::scope(&mut filter, principal, access);
    filter.set("pk", Predicate::eq("id", id));
    filter
}

/// A soft-deleted row can not be deleted again.
fn deletable_filter<R: Resource>(id: i64, principal: &Principal) -> Filter {
    let mut filter = scoped_filter::<R>(id, principal, Access::Write);
    if let DeletionPolicy::Soft { flag } = R::DELETION {
        filter.set("active", Predicate::eq(flag, true));
    }
    filter
}

async fn fetch_scoped<R: Resource>(
    conn: &mut PgConnection,
    id: i64,
    principal: &Principal,
    access: Access,
) -> Result<Option<R::Row>, AppError> {
    fetch_matching::<R>(conn, &scoped_filter::<R>(id, principal, access)).await
}

async fn fetch_matching<R: Resource>(
    conn: &mut PgConnection,
    filter: &Filter,
) -> Result<Option<R::Row>, AppError> {
    let mut query = select_query::<R>();
    filter.push_where(&mut query);

    Ok(query.build_query_as::<R::Row>().fetch_optional(&mut *conn).await?)
}

async fn exists_scoped<R: Resource>(
    conn: &mut PgConnection,
    id: i64,
    principal: &Principal,
) -> Result<bool, AppError> {
    let mut query =
        QueryBuilder::<Postgres>::new(format!("SELECT EXISTS (SELECT 1 FROM {} t", R::TABLE));
    scoped_filter::<R>(id, principal, Access::Write).push_where(&mut query);
    query.push(")");

    Ok(query.build_query_scalar::<bool>().fetch_one(&mut *conn).await?)
}

async fn insert<R: Resource>(conn: &mut PgConnection, columns: Columns) -> Result<i64, AppError> {
    let mut query = QueryBuilder::<Postgres>::new(format!("INSERT INTO {} ", R::TABLE));

    if columns.is_empty() {
        query.push("DEFAULT VALUES");
    } else {
        query
            .push("(")
            .push(columns.names().collect::<Vec<_>>().join(", "))
            .push(") VALUES (");
        for (i, (_, value)) in columns.into_inner().into_iter().enumerate() {
            if i > 0 {
                query.push(", ");
            }
            value.push_bind(&mut query);
        }
        query.push(")");
    }
    query.push(" RETURNING id");

    Ok(query.build_query_scalar::<i64>().fetch_one(&mut *conn).await?)
}

async fn update<R: Resource>(
    conn: &mut PgConnection,
    id: i64,
    columns: Columns,
) -> Result<(), AppError> {
    let mut query = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", R::TABLE));
    for (column, value) in columns.into_inner() {
        query.push(column).push(" = ");
        value.push_bind(&mut query);
        query.push(", ");
    }
    query.push("updated_at = NOW() WHERE id = ").push_bind(id);

    query.build().execute(&mut *conn).await?;
    Ok(())
}

fn database_error(err: &AppError) -> Option<&(dyn sqlx::error::DatabaseError + 'static)> {
    match err.error.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => Some(db_err.as_ref()),
        _ => None,
    }
}

/// Turns unique and foreign-key violations raised by a save into rejections.
pub(crate) fn constraint_error<R: Resource>(err: AppError) -> AppError {
    match database_error(&err) {
        Some(db_err) if db_err.is_unique_violation() => {
            AppError::rejected(format!("{} Already Exists.", R::LABEL))
        }
        Some(db_err) if db_err.is_foreign_key_violation() => AppError::rejected(INCOMPLETE_DETAILS),
        _ => err,
    }
}

/// A hard delete blocked by rows that still reference the target.
fn in_use_error<R: Resource>(err: AppError) -> AppError {
    match database_error(&err) {
        Some(db_err) if db_err.is_foreign_key_violation() => {
            AppError::rejected(format!("{} Is In Use.", R::LABEL))
        }
        _ => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_auth::PortalRole;

    use crate::modules::teachers::{TeacherRoles, Teachers};

    fn principal(role: PortalRole) -> Principal {
        Principal {
            id: 9,
            role,
            email: "p@example.com".into(),
        }
    }

    fn render(filter: &Filter) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("");
        filter.push_where(&mut qb);
        qb.sql().to_string()
    }

    #[test]
    fn test_row_lookup_keeps_self_scope() {
        let filter = scoped_filter::<Teachers>(4, &principal(PortalRole::Teacher), Access::Write);
        assert_eq!(filter.get("id"), Some(&Predicate::eq("id", 9_i64)));
        assert_eq!(filter.get("pk"), Some(&Predicate::eq("id", 4_i64)));
        assert_eq!(render(&filter), " WHERE t.id = $1 AND t.id = $2");
    }

    #[test]
    fn test_soft_deleted_rows_are_not_deletable() {
        let filter = deletable_filter::<TeacherRoles>(4, &principal(PortalRole::Admin));
        assert_eq!(render(&filter), " WHERE t.id = $1 AND t.status = $2");

        let filter = deletable_filter::<Teachers>(4, &principal(PortalRole::Admin));
        assert_eq!(render(&filter), " WHERE t.id = $1");
    }
}
