//! Collaborator interfaces for statement execution and schema introspection.
//!
//! Dialects never open connections themselves. They produce SQL text and hand
//! it to an [`Executor`]; column metadata comes from a [`SchemaIntrospector`].

use std::future::Future;
use std::pin::Pin;

use crate::column::ColumnDescriptor;
use crate::error::ExecuteError;
use crate::value::SqlValue;

/// A boxed future for async collaborator calls.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Rows returned by a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Column names, in select-list order.
    pub columns: Vec<String>,
    /// Row values, one entry per column.
    pub rows: Vec<Vec<SqlValue>>,
}

impl QueryResult {
    /// Creates an empty result with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    #[must_use]
    pub fn with_row(mut self, row: Vec<SqlValue>) -> Self {
        self.rows.push(row);
        self
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of a column, matched case-insensitively.
    ///
    /// Oracle reports unquoted aliases in upper case, so `id` finds `ID`.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Returns the value of `column` in the first row.
    #[must_use]
    pub fn first_value(&self, column: &str) -> Option<&SqlValue> {
        let index = self.column_index(column)?;
        self.rows.first().and_then(|row| row.get(index))
    }

    /// Returns every value of `column`.
    pub fn column_values<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a SqlValue> + 'a {
        let index = self.column_index(column);
        self.rows
            .iter()
            .filter_map(move |row| index.and_then(|i| row.get(i)))
    }

    /// Removes a column from the column list and from every row.
    ///
    /// Returns whether the column was present.
    pub fn remove_column(&mut self, name: &str) -> bool {
        let Some(index) = self.column_index(name) else {
            return false;
        };
        self.remove_at(index);
        true
    }

    /// Like [`QueryResult::remove_column`], but removes the last column
    /// named `name` when several share it.
    pub fn remove_last_column(&mut self, name: &str) -> bool {
        let Some(index) = self
            .columns
            .iter()
            .rposition(|c| c.eq_ignore_ascii_case(name))
        else {
            return false;
        };
        self.remove_at(index);
        true
    }

    fn remove_at(&mut self, index: usize) {
        self.columns.remove(index);
        for row in &mut self.rows {
            if index < row.len() {
                row.remove(index);
            }
        }
    }
}

/// Outcome of an INSERT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertResult {
    /// Number of rows written.
    pub rows_affected: u64,
    /// Generated key reported by the driver, if any.
    pub last_insert_id: Option<i64>,
}

/// Executes SQL statements on behalf of a dialect.
pub trait Executor: Send + Sync {
    /// Runs a statement and returns its rows (empty for non-queries).
    fn execute<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, Result<QueryResult, ExecuteError>>;

    /// Runs an INSERT with bind values.
    fn exec_insert<'a>(
        &'a self,
        sql: &'a str,
        binds: &'a [SqlValue],
    ) -> BoxFuture<'a, Result<InsertResult, ExecuteError>>;

    /// Runs an INSERT whose primary-key bind variable receives `id`.
    fn execute_id_insert<'a>(
        &'a self,
        sql: &'a str,
        id: i64,
    ) -> BoxFuture<'a, Result<InsertResult, ExecuteError>>;
}

/// Reads table and column metadata.
pub trait SchemaIntrospector: Send + Sync {
    /// Returns the columns of `table` within `schema`.
    fn columns<'a>(
        &'a self,
        table: &'a str,
        schema: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<ColumnDescriptor>, ExecuteError>>;

    /// Returns the table names within `schema`.
    fn tables<'a>(
        &'a self,
        schema: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<String>, ExecuteError>>;
}
