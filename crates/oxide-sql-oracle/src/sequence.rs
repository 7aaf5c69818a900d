//! Sequence-backed primary keys.
//!
//! Oracle has no auto-increment column. Every table created with a surrogate
//! key gets a companion sequence named `<table>_seq`, and inserts fetch the
//! next value from it before the row is written.

use oxide_sql_core::{Dialect, Executor};
use serde::Deserialize;
use tracing::{debug, info};

use crate::dialect::OracleDialect;
use crate::error::{OracleError, Result};
use crate::identifier::IDENTIFIER_LENGTH;

/// Suffix appended to the table name to form the default sequence name.
pub const SEQUENCE_SUFFIX: &str = "_seq";

/// First value of a sequence unless configured otherwise.
pub const DEFAULT_SEQUENCE_START: i64 = 10_000;

/// Derives the sequence name for `table_name`.
///
/// The table name is cut to 26 characters so the result always fits the
/// 30-character identifier limit.
///
/// ```
/// use oxide_sql_oracle::sequence::default_sequence_name;
///
/// assert_eq!(default_sequence_name("users"), "users_seq");
/// ```
#[must_use]
pub fn default_sequence_name(table_name: &str) -> String {
    let prefix: String = table_name
        .chars()
        .take(IDENTIFIER_LENGTH - SEQUENCE_SUFFIX.len())
        .collect();
    format!("{prefix}{SEQUENCE_SUFFIX}")
}

/// Options recognised when creating a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateTableOptions {
    /// Whether the table gets a surrogate key (and therefore a sequence).
    pub id: bool,
    /// Name of the surrogate key column.
    pub primary_key: String,
    /// Explicit sequence name.
    pub sequence_name: Option<String>,
    /// Explicit first sequence value.
    pub sequence_start_value: Option<i64>,
}

impl Default for CreateTableOptions {
    fn default() -> Self {
        Self {
            id: true,
            primary_key: String::from("id"),
            sequence_name: None,
            sequence_start_value: None,
        }
    }
}

impl CreateTableOptions {
    /// Creates the default options: an `id` key backed by `<table>_seq`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables the surrogate key and its sequence.
    #[must_use]
    pub fn without_id(mut self) -> Self {
        self.id = false;
        self
    }

    /// Renames the surrogate key column.
    #[must_use]
    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = name.into();
        self
    }

    /// Overrides the sequence name.
    #[must_use]
    pub fn sequence_name(mut self, name: impl Into<String>) -> Self {
        self.sequence_name = Some(name.into());
        self
    }

    /// Overrides the first sequence value.
    #[must_use]
    pub const fn sequence_start_value(mut self, start: i64) -> Self {
        self.sequence_start_value = Some(start);
        self
    }
}

/// Options recognised when dropping a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DropTableOptions {
    /// Explicit sequence name.
    pub sequence_name: Option<String>,
}

impl DropTableOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the sequence name.
    #[must_use]
    pub fn sequence_name(mut self, name: impl Into<String>) -> Self {
        self.sequence_name = Some(name.into());
        self
    }
}

/// A resolved sequence: its name and first value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceDescriptor {
    /// Sequence name.
    pub name: String,
    /// First value handed out.
    pub start_value: i64,
}

impl SequenceDescriptor {
    /// Resolves the sequence for `table_name` from explicit options, the
    /// configured start value and the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::SequenceNameTooLong`] when the name exceeds 30
    /// characters.
    pub fn resolve(
        table_name: &str,
        options: &CreateTableOptions,
        default_start: i64,
    ) -> Result<Self> {
        let name = options
            .sequence_name
            .clone()
            .unwrap_or_else(|| default_sequence_name(table_name));
        let length = name.chars().count();
        if length > IDENTIFIER_LENGTH {
            return Err(OracleError::SequenceNameTooLong {
                name,
                length,
                max: IDENTIFIER_LENGTH,
            });
        }
        Ok(Self {
            name,
            start_value: options.sequence_start_value.unwrap_or(default_start),
        })
    }

    /// Returns the `CREATE SEQUENCE` statement.
    #[must_use]
    pub fn create_sql(&self) -> String {
        format!(
            "CREATE SEQUENCE {} START WITH {}",
            self.name, self.start_value
        )
    }
}

/// Returns the `DROP SEQUENCE` statement for `table_name`.
#[must_use]
pub fn drop_sequence_sql(table_name: &str, options: &DropTableOptions) -> String {
    let name = options
        .sequence_name
        .clone()
        .unwrap_or_else(|| default_sequence_name(table_name));
    format!("DROP SEQUENCE {name}")
}

/// Returns the statement renaming `<old>_seq` to `<new>_seq`.
#[must_use]
pub fn rename_sequence_sql(old_table: &str, new_table: &str) -> String {
    format!("RENAME {old_table}{SEQUENCE_SUFFIX} TO {new_table}{SEQUENCE_SUFFIX}")
}

/// Returns the query fetching the next value of an already quoted sequence.
#[must_use]
pub fn next_value_sql(quoted_sequence: &str) -> String {
    format!("SELECT {quoted_sequence}.nextval id FROM dual")
}

/// Issues sequence statements through an [`Executor`].
pub struct SequenceManager<'a, E: ?Sized> {
    executor: &'a E,
    dialect: &'a OracleDialect,
    default_start: i64,
}

impl<'a, E: Executor + ?Sized> SequenceManager<'a, E> {
    /// Creates a manager starting new sequences at [`DEFAULT_SEQUENCE_START`].
    #[must_use]
    pub const fn new(executor: &'a E, dialect: &'a OracleDialect) -> Self {
        Self {
            executor,
            dialect,
            default_start: DEFAULT_SEQUENCE_START,
        }
    }

    /// Changes the start value used when the options do not give one.
    #[must_use]
    pub const fn default_start(mut self, start: i64) -> Self {
        self.default_start = start;
        self
    }

    /// Creates the sequence for a new table.
    ///
    /// The name is validated even when `options.id` is false, in which case
    /// nothing is issued. Returns the sequence that was created.
    ///
    /// # Errors
    ///
    /// Fails before issuing anything when the name is too long, and
    /// propagates executor errors.
    pub async fn create_sequence(
        &self,
        table_name: &str,
        options: &CreateTableOptions,
    ) -> Result<Option<SequenceDescriptor>> {
        let sequence = SequenceDescriptor::resolve(table_name, options, self.default_start)?;
        if !options.id {
            debug!(table = %table_name, "Primary key disabled, no sequence created");
            return Ok(None);
        }
        let sql = sequence.create_sql();
        debug!(sql = %sql, "Executing SQL");
        self.executor.execute(&sql).await?;
        info!(table = %table_name, sequence = %sequence.name, "Created sequence");
        Ok(Some(sequence))
    }

    /// Drops the sequence of a dropped table.
    ///
    /// The table may never have had a sequence, so failures are logged and
    /// swallowed. Returns whether the drop succeeded.
    pub async fn drop_sequence(&self, table_name: &str, options: &DropTableOptions) -> bool {
        let sql = drop_sequence_sql(table_name, options);
        debug!(sql = %sql, "Executing SQL");
        match self.executor.execute(&sql).await {
            Ok(_) => true,
            Err(error) => {
                debug!(table = %table_name, error = %error, "Ignoring failed sequence drop");
                false
            }
        }
    }

    /// Renames `<old>_seq` after a table rename, tolerating failure.
    ///
    /// Returns whether the rename succeeded.
    pub async fn rename_sequence(&self, old_table: &str, new_table: &str) -> bool {
        let sql = rename_sequence_sql(old_table, new_table);
        debug!(sql = %sql, "Executing SQL");
        match self.executor.execute(&sql).await {
            Ok(_) => true,
            Err(error) => {
                debug!(table = %old_table, error = %error, "Ignoring failed sequence rename");
                false
            }
        }
    }

    /// Fetches the next value of `sequence_name`.
    ///
    /// The query goes straight to the executor; sequence values must never be
    /// served from a statement cache.
    ///
    /// # Errors
    ///
    /// Propagates executor errors and returns [`OracleError::MissingValue`]
    /// when the result has no `id`.
    pub async fn next_sequence_value(&self, sequence_name: &str) -> Result<i64> {
        let sql = next_value_sql(&self.dialect.quote_table_name(sequence_name));
        debug!(sql = %sql, "Fetching next sequence value");
        let result = self.executor.execute(&sql).await?;
        match result.first_value("id") {
            Some(value) if !value.is_null() => Ok(value.to_integer()),
            _ => Err(OracleError::MissingValue {
                sql,
                column: String::from("id"),
            }),
        }
    }
}
