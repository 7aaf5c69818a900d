//! Executor-backed Oracle operations.

use std::collections::HashMap;

use oxide_sql_core::{
    ColumnDescriptor, ColumnType, Dialect, Executor, QueryResult, SchemaIntrospector, SqlValue,
};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::OracleConfig;
use crate::dialect::OracleDialect;
use crate::error::{OracleError, Result};
use crate::insert::extract_table_ref_from_insert_sql;
use crate::pagination::{self, PaginationSpec};
use crate::schema::{self, ColumnDefinition, ColumnOptions, TableDefinition};
use crate::sequence::{
    default_sequence_name, CreateTableOptions, DropTableOptions, SequenceDescriptor,
    SequenceManager,
};

const EXPLAIN_PLAN_SQL: &str = "SELECT * FROM TABLE(DBMS_XPLAN.DISPLAY)";

/// How an INSERT obtains its primary key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertOptions {
    /// Primary key column; `None` for tables without one.
    pub pk: Option<String>,
    /// Key assigned by the caller.
    pub id_value: Option<i64>,
    /// Sequence to draw the key from instead of the table's default.
    pub sequence_name: Option<String>,
}

impl InsertOptions {
    /// Creates options for a table without a primary key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primary key column.
    #[must_use]
    pub fn pk(mut self, pk: impl Into<String>) -> Self {
        self.pk = Some(pk.into());
        self
    }

    /// Uses a caller-assigned key.
    #[must_use]
    pub const fn id_value(mut self, id: i64) -> Self {
        self.id_value = Some(id);
        self
    }

    /// Draws the key from `name`.
    #[must_use]
    pub fn sequence_name(mut self, name: impl Into<String>) -> Self {
        self.sequence_name = Some(name.into());
        self
    }
}

/// Oracle adapter: issues dialect-generated statements through an
/// [`Executor`].
///
/// Session metadata that cannot change for a connection (current user,
/// database name, NLS parameters) is fetched once and memoised.
pub struct OracleAdapter<E> {
    executor: E,
    dialect: OracleDialect,
    config: OracleConfig,
    current_user: OnceCell<Option<String>>,
    current_database: OnceCell<Option<String>>,
    database_parameters: OnceCell<HashMap<String, String>>,
}

impl<E: Executor> OracleAdapter<E> {
    /// Creates an adapter with a dialect derived from `config`.
    pub fn new(executor: E, config: OracleConfig) -> Self {
        let dialect = OracleDialect::from_config(&config);
        Self::with_dialect(executor, dialect, config)
    }

    /// Creates an adapter sharing an existing dialect (and its caches).
    pub fn with_dialect(executor: E, dialect: OracleDialect, config: OracleConfig) -> Self {
        Self {
            executor,
            dialect,
            config,
            current_user: OnceCell::new(),
            current_database: OnceCell::new(),
            database_parameters: OnceCell::new(),
        }
    }

    /// Returns the executor.
    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &OracleDialect {
        &self.dialect
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Returns the schema tables are looked up in.
    #[must_use]
    pub fn oracle_schema(&self) -> Option<&str> {
        self.config.schema()
    }

    /// Returns a sequence manager over this adapter's executor.
    #[must_use]
    pub fn sequences(&self) -> SequenceManager<'_, E> {
        SequenceManager::new(&self.executor, &self.dialect)
            .default_start(self.config.sequence_start_value)
    }

    /// Runs one statement.
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn execute(&self, sql: &str) -> Result<QueryResult> {
        debug!(sql = %sql, "Executing SQL");
        Ok(self.executor.execute(sql).await?)
    }

    async fn select_value(&self, sql: &str, column: &str) -> Result<Option<SqlValue>> {
        let result = self.execute(sql).await?;
        Ok(result.first_value(column).filter(|v| !v.is_null()).cloned())
    }

    async fn select_text(&self, sql: &str, column: &str) -> Result<Option<String>> {
        Ok(self
            .select_value(sql, column)
            .await?
            .and_then(|v| v.to_text()))
    }

    // ---------------------------------------------------------------------
    // Schema statements
    // ---------------------------------------------------------------------

    /// Creates a table and, unless `options.id` is false, its sequence.
    ///
    /// # Errors
    ///
    /// Fails without issuing anything when the sequence name is too long or a
    /// column type cannot be rendered; propagates executor errors.
    pub async fn create_table(
        &self,
        table: &TableDefinition,
        options: &CreateTableOptions,
    ) -> Result<Option<SequenceDescriptor>> {
        SequenceDescriptor::resolve(&table.name, options, self.config.sequence_start_value)?;
        let sql = schema::create_table_sql(&self.dialect, table, options)?;
        self.execute(&sql).await?;
        info!(table = %table.name, "Created table");
        self.sequences().create_sequence(&table.name, options).await
    }

    /// Drops a table and its sequence.
    ///
    /// Both drops are allowed to fail. Returns whether the table drop
    /// succeeded.
    pub async fn drop_table(&self, table: &str, options: &DropTableOptions) -> bool {
        let sql = schema::drop_table_sql(&self.dialect, table);
        let dropped = match self.execute(&sql).await {
            Ok(_) => true,
            Err(error) => {
                debug!(table = %table, error = %error, "Ignoring failed table drop");
                false
            }
        };
        self.sequences().drop_sequence(table, options).await;
        dropped
    }

    /// Renames a table and then, if it exists, its sequence.
    ///
    /// # Errors
    ///
    /// Propagates a failed table rename.
    pub async fn rename_table(&self, table: &str, new_name: &str) -> Result<()> {
        self.execute(&schema::rename_table_sql(table, new_name)).await?;
        self.sequences().rename_sequence(table, new_name).await;
        Ok(())
    }

    /// Adds a column.
    ///
    /// # Errors
    ///
    /// Propagates rendering and executor errors.
    pub async fn add_column(&self, table: &str, column: &ColumnDefinition) -> Result<()> {
        let sql = schema::add_column_sql(&self.dialect, table, column)?;
        self.execute(&sql).await?;
        Ok(())
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn rename_column(&self, table: &str, column: &str, new_name: &str) -> Result<()> {
        let sql = schema::rename_column_sql(&self.dialect, table, column, new_name);
        self.execute(&sql).await?;
        Ok(())
    }

    /// Drops columns, one statement each.
    ///
    /// # Errors
    ///
    /// Stops at the first failing drop.
    pub async fn remove_column<S: AsRef<str>>(&self, table: &str, columns: &[S]) -> Result<()> {
        for sql in schema::remove_column_sql(&self.dialect, table, columns) {
            self.execute(&sql).await?;
        }
        Ok(())
    }

    /// Drops the index named `index_name`.
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn remove_index(&self, index_name: &str) -> Result<()> {
        self.execute(&schema::remove_index_sql(index_name)).await?;
        Ok(())
    }

    /// Changes a column's type and options.
    ///
    /// # Errors
    ///
    /// Propagates rendering and executor errors.
    pub async fn change_column(
        &self,
        table: &str,
        column: &str,
        column_type: ColumnType,
        options: &ColumnOptions,
    ) -> Result<()> {
        let sql = schema::change_column_sql(&self.dialect, table, column, column_type, options)?;
        self.execute(&sql).await?;
        Ok(())
    }

    /// Changes a column's default.
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn change_column_default(
        &self,
        table: &str,
        column: &str,
        default: &SqlValue,
    ) -> Result<()> {
        let sql = schema::change_column_default_sql(&self.dialect, table, column, default);
        self.execute(&sql).await?;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Data statements
    // ---------------------------------------------------------------------

    /// Fetches the next value of a sequence.
    ///
    /// # Errors
    ///
    /// See [`SequenceManager::next_sequence_value`].
    pub async fn next_sequence_value(&self, sequence_name: &str) -> Result<i64> {
        self.sequences().next_sequence_value(sequence_name).await
    }

    /// Runs an INSERT and returns the row's key.
    ///
    /// With a caller-assigned key, or no primary key at all, the statement is
    /// run as is and the assigned (or driver-reported) key is returned.
    /// Otherwise the statement must contain a bind variable for the key: the
    /// next value of the table's sequence is fetched and bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::InsertTable`] when the sequence has to be
    /// derived and the table cannot be located; propagates executor errors.
    pub async fn insert(
        &self,
        sql: &str,
        options: &InsertOptions,
        binds: &[SqlValue],
    ) -> Result<Option<i64>> {
        if options.id_value.is_some() || options.pk.is_none() {
            debug!(sql = %sql, "Executing insert");
            let result = self.executor.exec_insert(sql, binds).await?;
            return Ok(options.id_value.or(result.last_insert_id));
        }

        let sequence_name = match &options.sequence_name {
            Some(name) => name.clone(),
            None => {
                let table = extract_table_ref_from_insert_sql(sql)
                    .ok_or_else(|| OracleError::InsertTable(sql.to_string()))?;
                default_sequence_name(&table)
            }
        };
        let id = self.next_sequence_value(&sequence_name).await?;
        debug!(sql = %sql, id, "Executing insert with sequence key");
        self.executor.execute_id_insert(sql, id).await?;
        Ok(Some(id))
    }

    /// Runs a query, paginated with `ROWNUM` when `pagination` asks for it.
    ///
    /// The injected row-number column is removed from the result.
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn select(&self, sql: &str, pagination: &PaginationSpec) -> Result<QueryResult> {
        let paginated = pagination.is_paginated();
        let sql = pagination::apply(sql, pagination);
        let mut result = self.execute(&sql).await?;
        if paginated {
            pagination::strip_row_number(&mut result);
        }
        Ok(result)
    }

    /// Returns the execution plan of `sql`, one line per plan row.
    ///
    /// Statements against the `all_*` dictionary views are not explained.
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn explain(&self, sql: &str) -> Result<Option<String>> {
        let explain_sql = format!("EXPLAIN PLAN FOR {sql}");
        if explain_sql.contains("FROM all_") {
            debug!(sql = %sql, "Skipping explain of dictionary query");
            return Ok(None);
        }
        self.execute(&explain_sql).await?;
        let plan = self.execute(EXPLAIN_PLAN_SQL).await?;
        let lines: Vec<String> = plan
            .rows
            .iter()
            .filter_map(|row| row.first().and_then(SqlValue::to_text))
            .collect();
        Ok(Some(lines.join("\n")))
    }

    // ---------------------------------------------------------------------
    // Session metadata
    // ---------------------------------------------------------------------

    /// Returns the session user (memoised).
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn current_user(&self) -> Result<Option<String>> {
        self.current_user
            .get_or_try_init(|| {
                self.select_text("SELECT sys_context('userenv', 'session_user') su FROM dual", "su")
            })
            .await
            .cloned()
    }

    /// Returns the database name (memoised).
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn current_database(&self) -> Result<Option<String>> {
        self.current_database
            .get_or_try_init(|| {
                self.select_text("SELECT sys_context('userenv', 'db_name') db FROM dual", "db")
            })
            .await
            .cloned()
    }

    /// Returns the session's current schema.
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn current_schema(&self) -> Result<Option<String>> {
        self.select_text(
            "SELECT sys_context('userenv', 'current_schema') schema FROM dual",
            "schema",
        )
        .await
    }

    /// Switches the session's current schema.
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn set_current_schema(&self, schema_owner: &str) -> Result<()> {
        self.execute(&format!("ALTER SESSION SET current_schema={schema_owner}"))
            .await?;
        Ok(())
    }

    /// Returns whether `table` is a global temporary table.
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn temporary_table(&self, table: &str) -> Result<bool> {
        let sql = format!(
            "SELECT temporary FROM user_tables WHERE table_name = '{}'",
            self.dialect.quote_string(&table.to_uppercase())
        );
        Ok(self.select_text(&sql, "temporary").await?.as_deref() == Some("Y"))
    }

    /// Returns the tablespace holding `table`.
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn tablespace(&self, table: &str) -> Result<Option<String>> {
        let sql = format!(
            "SELECT tablespace_name FROM user_tables WHERE table_name = '{}'",
            self.dialect.quote_string(&table.to_uppercase())
        );
        self.select_text(&sql, "tablespace_name").await
    }

    /// Returns the NLS database parameters (memoised).
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn database_parameters(&self) -> Result<&HashMap<String, String>> {
        self.database_parameters
            .get_or_try_init(|| async {
                let result = self.execute("SELECT * FROM NLS_DATABASE_PARAMETERS").await?;
                Ok::<_, OracleError>(result
                    .rows
                    .iter()
                    .filter_map(|row| match (row.first(), row.get(1)) {
                        (Some(name), Some(value)) => {
                            Some((name.to_text()?, value.to_text().unwrap_or_default()))
                        }
                        _ => None,
                    })
                    .collect())
            })
            .await
    }

    /// Returns the database character set.
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn charset(&self) -> Result<Option<String>> {
        Ok(self.database_parameters().await?.get("NLS_CHARACTERSET").cloned())
    }

    /// Returns the database comparison mode.
    ///
    /// # Errors
    ///
    /// Propagates executor errors.
    pub async fn collation(&self) -> Result<Option<String>> {
        Ok(self.database_parameters().await?.get("NLS_COMP").cloned())
    }

    // ---------------------------------------------------------------------
    // Introspection
    // ---------------------------------------------------------------------

    /// Returns the columns of `table` in the configured schema.
    ///
    /// # Errors
    ///
    /// Propagates introspection errors.
    pub async fn columns<I: SchemaIntrospector + ?Sized>(
        &self,
        introspector: &I,
        table: &str,
    ) -> Result<Vec<ColumnDescriptor>> {
        Ok(introspector.columns(table, self.oracle_schema()).await?)
    }

    /// Returns the tables of the configured schema.
    ///
    /// # Errors
    ///
    /// Propagates introspection errors.
    pub async fn tables<I: SchemaIntrospector + ?Sized>(&self, introspector: &I) -> Result<Vec<String>> {
        Ok(introspector.tables(self.oracle_schema()).await?)
    }

    /// Returns whether inserts into `table` should fetch their key from a
    /// sequence first, i.e. whether the table has a primary key.
    ///
    /// # Errors
    ///
    /// Propagates introspection errors.
    pub async fn prefetch_primary_key<I: SchemaIntrospector + ?Sized>(
        &self,
        introspector: &I,
        table: &str,
    ) -> Result<bool> {
        let columns = self.columns(introspector, table).await?;
        Ok(columns.iter().any(|c| c.primary))
    }
}
