//! Query-filter composer.
//!
//! Builds the `WHERE` clause of a list query incrementally from optional
//! request parameters. Each helper inspects one raw parameter and either adds
//! a condition or does nothing; none of them fail.
//!
//! A [`Filter`] holds keyed conditions (joined with `AND`) and one `OR`
//! group used for free-text search. Setting a key that already exists
//! replaces the previous condition in place.
//!
//! The filter is rendered against a main table aliased `t`:
//!
//! ```
//! use campus_core::filter::{Filter, SearchColumn, like_if_value, where_if_value};
//! use campus_core::normalize::int_or_none;
//! use sqlx::{Postgres, QueryBuilder};
//!
//! let mut filter = Filter::new();
//! where_if_value(&mut filter, "course_id", Some("3"), int_or_none);
//! like_if_value(&mut filter, &[SearchColumn::Single("name")], Some("math"));
//!
//! let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM semesters t");
//! filter.push_where(&mut qb);
//! assert_eq!(
//!     qb.sql(),
//!     "SELECT * FROM semesters t WHERE t.course_id = $1 AND (t.name ILIKE $2)"
//! );
//! ```

use sqlx::{Postgres, QueryBuilder};

use crate::normalize::FlagValue;
use crate::value::SqlValue;

pub const MAIN_ALIAS: &str = "t";

/// How a related table joins back to the row being filtered.
///
/// Renders as `EXISTS (SELECT 1 FROM {table} r WHERE r.{related_key} = t.{local_key} AND ...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub table: &'static str,
    pub related_key: &'static str,
    pub local_key: &'static str,
}

impl Relation {
    /// A one-to-many relation: rows of `table` whose `foreign_key` points at `t.id`.
    pub const fn children(table: &'static str, foreign_key: &'static str) -> Self {
        Self {
            table,
            related_key: foreign_key,
            local_key: "id",
        }
    }

    /// A many-to-one relation: the row of `table` referenced by `t.{local_key}`.
    pub const fn parent(table: &'static str, local_key: &'static str) -> Self {
        Self {
            table,
            related_key: "id",
            local_key,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(SqlValue),
    /// Case-insensitive substring match; wildcards in the needle are literal.
    Contains(String),
    AnyOf(Vec<i64>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Column {
        column: String,
        condition: Condition,
    },
    Related {
        relation: Relation,
        predicate: Box<Predicate>,
    },
    All(Vec<Predicate>),
}

impl Predicate {
    pub fn eq(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Predicate::Column {
            column: column.into(),
            condition: Condition::Eq(value.into()),
        }
    }

    pub fn contains(column: impl Into<String>, needle: impl Into<String>) -> Self {
        Predicate::Column {
            column: column.into(),
            condition: Condition::Contains(needle.into()),
        }
    }

    pub fn any_of(column: impl Into<String>, values: Vec<i64>) -> Self {
        Predicate::Column {
            column: column.into(),
            condition: Condition::AnyOf(values),
        }
    }

    pub fn related(relation: Relation, predicate: Predicate) -> Self {
        Predicate::Related {
            relation,
            predicate: Box::new(predicate),
        }
    }

    fn render(&self, qb: &mut QueryBuilder<'_, Postgres>, alias: &str, depth: usize) {
        match self {
            Predicate::Column { column, condition } => {
                qb.push(alias).push(".").push(column);
                match condition {
                    Condition::Eq(value) => {
                        qb.push(" = ");
                        value.clone().push_bind(qb);
                    }
                    Condition::Contains(needle) => {
                        qb.push(" ILIKE ")
                            .push_bind(format!("%{}%", escape_like(needle)));
                    }
                    Condition::AnyOf(values) => {
                        qb.push(" = ANY(").push_bind(values.clone()).push(")");
                    }
                }
            }
            Predicate::Related {
                relation,
                predicate,
            } => {
                let inner = format!("r{depth}");
                qb.push("EXISTS (SELECT 1 FROM ")
                    .push(relation.table)
                    .push(" ")
                    .push(&inner)
                    .push(" WHERE ")
                    .push(&inner)
                    .push(".")
                    .push(relation.related_key)
                    .push(" = ")
                    .push(alias)
                    .push(".")
                    .push(relation.local_key)
                    .push(" AND ");
                predicate.render(qb, &inner, depth + 1);
                qb.push(")");
            }
            Predicate::All(predicates) => {
                qb.push("(");
                for (i, predicate) in predicates.iter().enumerate() {
                    if i > 0 {
                        qb.push(" AND ");
                    }
                    predicate.render(qb, alias, depth);
                }
                qb.push(")");
            }
        }
    }
}

/// Escapes `%`, `_` and `\` for use inside an `ILIKE` pattern.
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Predicate)>,
    any: Vec<Predicate>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the condition stored under `key`, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, predicate: Predicate) {
        let key = key.into();
        match self.conditions.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = predicate,
            None => self.conditions.push((key, predicate)),
        }
    }

    /// Column equality keyed by the column name.
    pub fn where_eq(&mut self, column: &str, value: impl Into<SqlValue>) {
        self.set(column, Predicate::eq(column, value));
    }

    pub fn remove(&mut self, key: &str) {
        self.conditions.retain(|(existing, _)| existing != key);
    }

    pub fn get(&self, key: &str) -> Option<&Predicate> {
        self.conditions
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, predicate)| predicate)
    }

    /// Replaces the `OR` group.
    pub fn set_any(&mut self, predicates: Vec<Predicate>) {
        self.any = predicates;
    }

    /// Appends to the `OR` group.
    pub fn extend_any(&mut self, predicates: impl IntoIterator<Item = Predicate>) {
        self.any.extend(predicates);
    }

    pub fn any(&self) -> &[Predicate] {
        &self.any
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.any.is_empty()
    }

    /// Pushes ` WHERE ...` when the filter has any condition.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if self.is_empty() {
            return;
        }
        qb.push(" WHERE ");
        self.push_conditions(qb);
    }

    /// Pushes the bare conditions, for callers that already opened a `WHERE`.
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut first = true;
        for (_, predicate) in &self.conditions {
            if !first {
                qb.push(" AND ");
            }
            first = false;
            predicate.render(qb, MAIN_ALIAS, 1);
        }

        if !self.any.is_empty() {
            if !first {
                qb.push(" AND ");
            }
            qb.push("(");
            for (i, predicate) in self.any.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                predicate.render(qb, MAIN_ALIAS, 1);
            }
            qb.push(")");
        }
    }
}

/// A searchable column, or a sequence of columns matched positionally
/// against the whitespace-separated words of the search text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchColumn {
    Single(&'static str),
    Composite(&'static [&'static str]),
}

/// Sets `filter[column] = normalize(raw)` when the normalized value is present.
pub fn where_if_value<T, F>(filter: &mut Filter, column: &str, raw: Option<&str>, normalize: F)
where
    T: Into<SqlValue>,
    F: FnOnce(&str) -> Option<T>,
{
    if let Some(value) = raw.and_then(normalize) {
        filter.where_eq(column, value);
    }
}

/// Requires some row of `relation` to have `column = normalize(raw)`.
///
/// Keyed by the relation's table, so a second call on the same relation
/// replaces the first.
pub fn where_some_if_value<T, F>(
    filter: &mut Filter,
    relation: Relation,
    column: &str,
    raw: Option<&str>,
    normalize: F,
) where
    T: Into<SqlValue>,
    F: FnOnce(&str) -> Option<T>,
{
    if let Some(value) = raw.and_then(normalize) {
        filter.set(
            relation.table,
            Predicate::related(relation, Predicate::eq(column, value)),
        );
    }
}

/// Sets a boolean equality from `"1"`/`"0"` (or numeric 1/0). Anything else is ignored.
pub fn where_if_flag<V>(filter: &mut Filter, column: &str, raw: Option<&V>)
where
    V: FlagValue + ?Sized,
{
    if let Some(flag) = raw.and_then(|value| value.as_flag()) {
        filter.where_eq(column, flag);
    }
}

/// The three lifecycle flags a table may carry under a common prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleFlags<'a> {
    pub status: Option<&'a str>,
    pub archived: Option<&'a str>,
    pub deleted: Option<&'a str>,
}

/// Applies [`where_if_flag`] to `{prefix}_status`, `{prefix}_archive` and `{prefix}_delete`.
pub fn where_if_flags(filter: &mut Filter, prefix: &str, flags: LifecycleFlags<'_>) {
    where_if_flag(filter, &format!("{prefix}_status"), flags.status);
    where_if_flag(filter, &format!("{prefix}_archive"), flags.archived);
    where_if_flag(filter, &format!("{prefix}_delete"), flags.deleted);
}

/// Replaces the `OR` group with substring matches of `search` across `columns`.
///
/// Blank search text leaves the filter untouched.
pub fn like_if_value(filter: &mut Filter, columns: &[SearchColumn], search: Option<&str>) {
    let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) else {
        return;
    };

    let predicates = columns
        .iter()
        .filter_map(|column| match column {
            SearchColumn::Single(name) => Some(Predicate::contains(*name, search)),
            SearchColumn::Composite(names) => {
                let parts: Vec<Predicate> = names
                    .iter()
                    .zip(search.split_whitespace())
                    .map(|(name, word)| Predicate::contains(*name, word))
                    .collect();
                (!parts.is_empty()).then_some(Predicate::All(parts))
            }
        })
        .collect();

    filter.set_any(predicates);
}

/// Appends substring matches through related tables to the `OR` group.
pub fn nested_like_if_value(
    filter: &mut Filter,
    pairs: &[(Relation, &'static str)],
    search: Option<&str>,
) {
    let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) else {
        return;
    };

    filter.extend_any(pairs.iter().map(|(relation, column)| {
        Predicate::related(*relation, Predicate::contains(*column, search))
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{int_or_none, string_or_none};

    fn render(filter: &Filter) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM x t");
        filter.push_where(&mut qb);
        qb.sql().trim_start_matches("SELECT * FROM x t").to_string()
    }

    #[test]
    fn test_empty_filter_renders_nothing() {
        assert_eq!(render(&Filter::new()), "");
    }

    #[test]
    fn test_where_if_value_sets_normalized() {
        let mut filter = Filter::new();
        where_if_value(&mut filter, "batch_id", Some(" 12 "), int_or_none);
        assert_eq!(filter.get("batch_id"), Some(&Predicate::eq("batch_id", 12_i64)));
        assert_eq!(render(&filter), " WHERE t.batch_id = $1");
    }

    #[test]
    fn test_where_if_value_ignores_absent_and_invalid() {
        let mut filter = Filter::new();
        where_if_value(&mut filter, "batch_id", None, int_or_none);
        where_if_value(&mut filter, "batch_id", Some("abc"), int_or_none);
        where_if_value(&mut filter, "batch_id", Some("-4"), int_or_none);
        where_if_value(&mut filter, "name", Some("   "), string_or_none);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_repeated_key_overwrites() {
        let mut filter = Filter::new();
        where_if_value(&mut filter, "course_id", Some("1"), int_or_none);
        where_if_value(&mut filter, "year", Some("2024"), int_or_none);
        where_if_value(&mut filter, "course_id", Some("2"), int_or_none);

        assert_eq!(filter.len(), 2);
        assert_eq!(filter.get("course_id"), Some(&Predicate::eq("course_id", 2_i64)));
        assert_eq!(render(&filter), " WHERE t.course_id = $1 AND t.year = $2");
    }

    #[test]
    fn test_where_if_flag_accepts_zero_and_one() {
        let mut filter = Filter::new();
        where_if_flag(&mut filter, "status", Some("1"));
        assert_eq!(filter.get("status"), Some(&Predicate::eq("status", true)));

        where_if_flag(&mut filter, "status", Some(&0_i64));
        assert_eq!(filter.get("status"), Some(&Predicate::eq("status", false)));
    }

    #[test]
    fn test_where_if_flag_ignores_other_values() {
        let mut filter = Filter::new();
        for raw in ["true", "yes", "2", "", "-1", "1.0"] {
            where_if_flag(&mut filter, "status", Some(raw));
        }
        where_if_flag(&mut filter, "status", Some(&7_i64));
        where_if_flag::<str>(&mut filter, "status", None);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_where_if_flags_uses_prefix() {
        let mut filter = Filter::new();
        where_if_flags(
            &mut filter,
            "event",
            LifecycleFlags {
                status: Some("1"),
                archived: Some("0"),
                deleted: Some("maybe"),
            },
        );
        assert_eq!(render(&filter), " WHERE t.event_status = $1 AND t.event_archive = $2");
    }

    #[test]
    fn test_like_if_value_builds_or_group() {
        let mut filter = Filter::new();
        like_if_value(
            &mut filter,
            &[SearchColumn::Single("first_name"), SearchColumn::Single("email")],
            Some("ann"),
        );
        assert_eq!(
            render(&filter),
            " WHERE (t.first_name ILIKE $1 OR t.email ILIKE $2)"
        );
    }

    #[test]
    fn test_like_if_value_blank_is_noop() {
        let mut filter = Filter::new();
        for search in [None, Some(""), Some("   "), Some("\t\n")] {
            like_if_value(&mut filter, &[SearchColumn::Single("name")], search);
        }
        assert!(filter.is_empty());
    }

    #[test]
    fn test_like_if_value_trims_search() {
        let mut filter = Filter::new();
        like_if_value(&mut filter, &[SearchColumn::Single("name")], Some("  Eng  "));
        assert_eq!(filter.any(), &[Predicate::contains("name", "Eng")]);
    }

    #[test]
    fn test_like_if_value_replaces_previous_group() {
        let mut filter = Filter::new();
        like_if_value(&mut filter, &[SearchColumn::Single("name")], Some("a"));
        like_if_value(&mut filter, &[SearchColumn::Single("code")], Some("b"));
        assert_eq!(filter.any(), &[Predicate::contains("code", "b")]);
    }

    #[test]
    fn test_composite_column_matches_words_positionally() {
        let mut filter = Filter::new();
        like_if_value(
            &mut filter,
            &[
                SearchColumn::Composite(&["first_name", "last_name"]),
                SearchColumn::Single("email"),
            ],
            Some("Ada   Lovelace"),
        );

        assert_eq!(
            filter.any()[0],
            Predicate::All(vec![
                Predicate::contains("first_name", "Ada"),
                Predicate::contains("last_name", "Lovelace"),
            ])
        );
        assert_eq!(
            render(&filter),
            " WHERE ((t.first_name ILIKE $1 AND t.last_name ILIKE $2) OR t.email ILIKE $3)"
        );
    }

    #[test]
    fn test_composite_column_with_single_word() {
        let mut filter = Filter::new();
        like_if_value(
            &mut filter,
            &[SearchColumn::Composite(&["first_name", "last_name"])],
            Some("Ada"),
        );
        assert_eq!(
            filter.any(),
            &[Predicate::All(vec![Predicate::contains("first_name", "Ada")])]
        );
    }

    #[test]
    fn test_nested_like_appends_to_group() {
        const COURSE: Relation = Relation::parent("courses", "course_id");

        let mut filter = Filter::new();
        like_if_value(&mut filter, &[SearchColumn::Single("name")], Some("web"));
        nested_like_if_value(&mut filter, &[(COURSE, "name")], Some("web"));

        assert_eq!(filter.any().len(), 2);
        assert_eq!(
            render(&filter),
            " WHERE (t.name ILIKE $1 OR EXISTS (SELECT 1 FROM courses r1 WHERE r1.id = t.course_id AND r1.name ILIKE $2))"
        );
    }

    #[test]
    fn test_nested_like_blank_is_noop() {
        let mut filter = Filter::new();
        nested_like_if_value(
            &mut filter,
            &[(Relation::children("units", "subject_id"), "name")],
            Some("  "),
        );
        assert!(filter.is_empty());
    }

    #[test]
    fn test_where_some_if_value() {
        let mut filter = Filter::new();
        where_some_if_value(
            &mut filter,
            Relation::children("division_subject_teachers", "teacher_id"),
            "division_id",
            Some("4"),
            int_or_none,
        );
        assert_eq!(
            render(&filter),
            " WHERE EXISTS (SELECT 1 FROM division_subject_teachers r1 WHERE r1.teacher_id = t.id AND r1.division_id = $1)"
        );
    }

    #[test]
    fn test_conditions_and_search_combined() {
        let mut filter = Filter::new();
        where_if_value(&mut filter, "course_id", Some("1"), int_or_none);
        like_if_value(&mut filter, &[SearchColumn::Single("name")], Some("x"));
        filter.set("ids", Predicate::any_of("id", vec![1, 2]));

        assert_eq!(
            render(&filter),
            " WHERE t.course_id = $1 AND t.id = ANY($2) AND (t.name ILIKE $3)"
        );
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_remove_key() {
        let mut filter = Filter::new();
        filter.where_eq("status", true);
        filter.remove("status");
        assert!(filter.is_empty());
    }
}
