//! `ROWNUM` pagination.
//!
//! Oracle has no `LIMIT`/`OFFSET` clause. A paginated query is wrapped twice:
//! the inner wrapper numbers rows with `ROWNUM` and cuts at the upper bound,
//! the outer one filters on the row number to skip the offset.

use oxide_sql_core::QueryResult;
use serde::Deserialize;

/// Alias of the row-number column injected by pagination.
pub const ROW_NUMBER_ALIAS: &str = "rn";

/// Alias given to the wrapped query.
pub const SUBQUERY_ALIAS: &str = "raw_sql_";

/// Limit and offset of a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationSpec {
    /// Maximum number of rows.
    pub limit: Option<u64>,
    /// Number of rows skipped.
    pub offset: u64,
}

impl PaginationSpec {
    /// Creates an unbounded spec.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            limit: None,
            offset: 0,
        }
    }

    /// Sets the limit.
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the offset.
    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Returns whether applying this spec changes the query.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.limit.is_some() || self.offset > 0
    }

    /// Returns the last row number kept, `offset + limit`.
    #[must_use]
    pub const fn upper_bound(&self) -> Option<u64> {
        match self.limit {
            Some(limit) => Some(self.offset.saturating_add(limit)),
            None => None,
        }
    }
}

/// Rewrites `sql` in place to return only the rows selected by `spec`.
///
/// ```
/// use oxide_sql_oracle::pagination::{add_limit_offset, PaginationSpec};
///
/// let mut sql = String::from("SELECT * FROM posts");
/// add_limit_offset(&mut sql, &PaginationSpec::new().limit(10).offset(20));
/// assert!(sql.contains("ROWNUM <= 30"));
/// assert!(sql.ends_with("WHERE rn > 20"));
/// ```
pub fn add_limit_offset(sql: &mut String, spec: &PaginationSpec) {
    let offset = spec.offset;
    let wrapped = match spec.upper_bound() {
        Some(bound) => format!(
            "SELECT * FROM (SELECT {SUBQUERY_ALIAS}.*, ROWNUM {ROW_NUMBER_ALIAS} FROM ({sql}) \
             {SUBQUERY_ALIAS} WHERE ROWNUM <= {bound}) WHERE {ROW_NUMBER_ALIAS} > {offset}"
        ),
        None if offset > 0 => format!(
            "SELECT * FROM (SELECT {SUBQUERY_ALIAS}.*, ROWNUM {ROW_NUMBER_ALIAS} FROM ({sql}) \
             {SUBQUERY_ALIAS}) WHERE {ROW_NUMBER_ALIAS} > {offset}"
        ),
        None => return,
    };
    *sql = wrapped;
}

/// Returns `sql` rewritten by [`add_limit_offset`].
#[must_use]
pub fn apply(sql: &str, spec: &PaginationSpec) -> String {
    let mut sql = sql.to_string();
    add_limit_offset(&mut sql, spec);
    sql
}

/// Removes the injected row-number column from a result.
///
/// The wrapper appends it after the query's own columns, so only the last
/// column named [`ROW_NUMBER_ALIAS`] is removed. Returns whether it was
/// present.
pub fn strip_row_number(result: &mut QueryResult) -> bool {
    result.remove_last_column(ROW_NUMBER_ALIAS)
}
