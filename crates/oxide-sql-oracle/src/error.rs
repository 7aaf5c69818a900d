//! Error types for the Oracle dialect.

use oxide_sql_core::{DialectError, ExecuteError};

/// Errors that can occur while generating or running Oracle statements.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// A sequence name does not fit Oracle's identifier limit.
    #[error("sequence name '{name}' too long ({length} > {max} characters)")]
    SequenceNameTooLong {
        /// The offending sequence name.
        name: String,
        /// Its length in characters.
        length: usize,
        /// The identifier limit.
        max: usize,
    },

    /// A statement sent to the executor failed.
    #[error("Database error: {0}")]
    Execute(#[from] ExecuteError),

    /// A SQL fragment could not be rendered.
    #[error("Dialect error: {0}")]
    Dialect(#[from] DialectError),

    /// A query that must return a scalar returned nothing usable.
    #[error("query returned no value for column '{column}': {sql}")]
    MissingValue {
        /// The query that was run.
        sql: String,
        /// The column that was expected.
        column: String,
    },

    /// The table reference of an INSERT could not be located.
    #[error("cannot find the target table of insert: {0}")]
    InsertTable(String),

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for Oracle dialect operations.
pub type Result<T> = std::result::Result<T, OracleError>;
