//! Typed SQL parameter values.
//!
//! Resources describe their writable columns as `(column, SqlValue)` pairs so
//! that a single generic `INSERT`/`UPDATE` builder can bind them.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(Option<i64>),
    Bool(Option<bool>),
    Text(Option<String>),
    Timestamp(Option<DateTime<Utc>>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        match self {
            SqlValue::Int(v) => v.is_none(),
            SqlValue::Bool(v) => v.is_none(),
            SqlValue::Text(v) => v.is_none(),
            SqlValue::Timestamp(v) => v.is_none(),
        }
    }

    /// Pushes a bound placeholder for this value.
    pub fn push_bind(self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            SqlValue::Int(v) => qb.push_bind(v),
            SqlValue::Bool(v) => qb.push_bind(v),
            SqlValue::Text(v) => qb.push_bind(v),
            SqlValue::Timestamp(v) => qb.push_bind(v),
        };
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(Some(value))
    }
}

impl From<Option<i64>> for SqlValue {
    fn from(value: Option<i64>) -> Self {
        SqlValue::Int(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(Some(value))
    }
}

impl From<Option<bool>> for SqlValue {
    fn from(value: Option<bool>) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(Some(value))
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(Some(value.to_string()))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        SqlValue::Text(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(Some(value))
    }
}

impl From<Option<DateTime<Utc>>> for SqlValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        SqlValue::Timestamp(value)
    }
}

/// Ordered column assignments for an insert or update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Columns(Vec<(&'static str, SqlValue)>);

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Adds the column only when the value is present.
    pub fn set_some<V: Into<SqlValue>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(column, value);
        }
        self
    }

    pub fn insert(&mut self, column: &'static str, value: impl Into<SqlValue>) {
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == column) {
            Some(slot) => slot.1 = value,
            None => self.0.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.0
            .iter()
            .find(|(existing, _)| *existing == column)
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(column, _)| *column)
    }

    pub fn into_inner(self) -> Vec<(&'static str, SqlValue)> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_same_column() {
        let columns = Columns::new().set("name", "first").set("name", "second");
        assert_eq!(columns.len(), 1);
        assert_eq!(columns.get("name"), Some(&SqlValue::Text(Some("second".into()))));
    }

    #[test]
    fn test_set_some_skips_none() {
        let columns = Columns::new()
            .set_some("password", None::<String>)
            .set_some("status", Some(true));
        assert_eq!(columns.names().collect::<Vec<_>>(), vec!["status"]);
    }

    #[test]
    fn test_null_detection() {
        assert!(SqlValue::from(None::<i64>).is_null());
        assert!(!SqlValue::from(3_i64).is_null());
    }

    #[test]
    fn test_push_bind_uses_placeholders() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
        SqlValue::from(1_i64).push_bind(&mut qb);
        qb.push(", ");
        SqlValue::from("x").push_bind(&mut qb);
        assert_eq!(qb.sql(), "SELECT $1, $2");
    }
}
