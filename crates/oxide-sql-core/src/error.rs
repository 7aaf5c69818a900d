//! Error types shared by every dialect.

use thiserror::Error;

use crate::column::ColumnType;

/// Errors raised while rendering SQL fragments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialectError {
    /// A decimal type was given a scale but no precision.
    #[error("error adding {column_type} column: precision cannot be empty if scale is specified")]
    ScaleWithoutPrecision {
        /// The abstract type being rendered.
        column_type: ColumnType,
    },

    /// The abstract type name is not one of the known column types.
    #[error("unknown column type: {0}")]
    UnknownColumnType(String),
}

/// Errors reported by an [`Executor`](crate::executor::Executor) or
/// [`SchemaIntrospector`](crate::executor::SchemaIntrospector).
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// The database rejected a statement.
    #[error("statement failed: {message}")]
    Statement {
        /// The statement that was sent.
        sql: String,
        /// The driver's error message.
        message: String,
    },

    /// The connection could not be used.
    #[error("connection error: {0}")]
    Connection(String),
}

impl ExecuteError {
    /// Creates a statement error.
    pub fn statement(sql: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Statement {
            sql: sql.into(),
            message: message.into(),
        }
    }
}
