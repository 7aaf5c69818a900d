//! DDL statement generation.
//!
//! These functions only render SQL; [`crate::OracleAdapter`] runs them and
//! keeps the companion sequences in step.

use oxide_sql_core::{ColumnDescriptor, ColumnType, Dialect, SqlValue};

use crate::dialect::OracleDialect;
use crate::error::Result;
use crate::sequence::CreateTableOptions;

/// Per-column options: size, nullability and default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnOptions {
    /// Declared length.
    pub limit: Option<u32>,
    /// Declared precision.
    pub precision: Option<u32>,
    /// Declared scale.
    pub scale: Option<u32>,
    /// `Some(false)` renders `NOT NULL`, `Some(true)` renders `NULL`.
    pub null: Option<bool>,
    /// Default value.
    pub default: Option<SqlValue>,
}

impl ColumnOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the length.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets precision and scale.
    #[must_use]
    pub const fn precision(mut self, precision: u32, scale: Option<u32>) -> Self {
        self.precision = Some(precision);
        self.scale = scale;
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.null = Some(false);
        self
    }

    /// Marks the column explicitly nullable.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.null = Some(true);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: SqlValue) -> Self {
        self.default = Some(value);
        self
    }
}

/// A column to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Abstract type.
    pub column_type: ColumnType,
    /// Size, nullability and default.
    pub options: ColumnOptions,
}

impl ColumnDefinition {
    /// Creates a column with no options.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            options: ColumnOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn options(mut self, options: ColumnOptions) -> Self {
        self.options = options;
        self
    }

    /// Renders the native type declaration.
    ///
    /// # Errors
    ///
    /// See [`Dialect::type_to_sql`].
    pub fn sql_type(&self, dialect: &OracleDialect) -> Result<String> {
        Ok(dialect.type_to_sql(
            self.column_type,
            self.options.limit,
            self.options.precision,
            self.options.scale,
        )?)
    }

    /// Describes the column as introspection would report it.
    ///
    /// # Errors
    ///
    /// See [`Dialect::type_to_sql`].
    pub fn descriptor(&self, dialect: &OracleDialect) -> Result<ColumnDescriptor> {
        let mut column =
            ColumnDescriptor::new(&self.name, self.column_type).sql_type(self.sql_type(dialect)?);
        column.limit = self.options.limit;
        column.precision = self.options.precision;
        column.scale = self.options.scale;
        column.nullable = self.options.null != Some(false);
        Ok(column)
    }

    /// Renders `"NAME" TYPE [DEFAULT ..] [NOT NULL]`.
    ///
    /// # Errors
    ///
    /// See [`Dialect::type_to_sql`].
    pub fn to_sql(&self, dialect: &OracleDialect) -> Result<String> {
        let descriptor = self.descriptor(dialect)?;
        let mut sql = format!(
            "{} {}",
            dialect.quote_column_name(&self.name),
            descriptor.sql_type.as_deref().unwrap_or_default()
        );
        add_column_options(dialect, &mut sql, &self.options, Some(&descriptor));
        Ok(sql)
    }
}

/// A table to be created.
///
/// ```
/// use oxide_sql_oracle::schema::TableDefinition;
/// use oxide_sql_core::ColumnType;
///
/// let table = TableDefinition::new("documents")
///     .column("title", ColumnType::String)
///     .raw("checksum", 32)
///     .xml("body");
/// assert_eq!(table.columns.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    /// Table name.
    pub name: String,
    /// Columns, in declaration order.
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    /// Creates a table with no columns.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Adds a column without options.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.columns.push(ColumnDefinition::new(name, column_type));
        self
    }

    /// Adds a column with options.
    #[must_use]
    pub fn column_with(
        mut self,
        name: impl Into<String>,
        column_type: ColumnType,
        options: ColumnOptions,
    ) -> Self {
        self.columns
            .push(ColumnDefinition::new(name, column_type).options(options));
        self
    }

    /// Adds a `RAW(limit)` column.
    #[must_use]
    pub fn raw(self, name: impl Into<String>, limit: u32) -> Self {
        self.column_with(name, ColumnType::Raw, ColumnOptions::new().limit(limit))
    }

    /// Adds an `XMLTYPE` column.
    #[must_use]
    pub fn xml(self, name: impl Into<String>) -> Self {
        self.column(name, ColumnType::Xml)
    }
}

/// Appends ` DEFAULT <value>` and the nullability clause to `sql`.
///
/// The default is quoted against `column` when given, so an empty CLOB
/// default becomes `empty_clob()` rather than a string literal.
pub fn add_column_options(
    dialect: &OracleDialect,
    sql: &mut String,
    options: &ColumnOptions,
    column: Option<&ColumnDescriptor>,
) {
    if let Some(default) = &options.default {
        sql.push_str(" DEFAULT ");
        sql.push_str(&dialect.quote(default, column));
    }
    match options.null {
        Some(false) => sql.push_str(" NOT NULL"),
        Some(true) => sql.push_str(" NULL"),
        None => {}
    }
}

/// Renders `CREATE TABLE`.
///
/// Unless `options.id` is false, the surrogate key column comes first.
///
/// # Errors
///
/// Propagates type rendering errors.
pub fn create_table_sql(
    dialect: &OracleDialect,
    table: &TableDefinition,
    options: &CreateTableOptions,
) -> Result<String> {
    let mut columns = Vec::with_capacity(table.columns.len() + 1);
    if options.id {
        columns.push(format!(
            "{} {}",
            dialect.quote_column_name(&options.primary_key),
            dialect.type_to_sql(ColumnType::PrimaryKey, None, None, None)?
        ));
    }
    for column in &table.columns {
        columns.push(column.to_sql(dialect)?);
    }
    Ok(format!(
        "CREATE TABLE {} ({})",
        dialect.quote_table_name(&table.name),
        columns.join(", ")
    ))
}

/// Renders `DROP TABLE`.
#[must_use]
pub fn drop_table_sql(dialect: &OracleDialect, table: &str) -> String {
    format!("DROP TABLE {}", dialect.quote_table_name(table))
}

/// Renders the table rename. `RENAME` takes bare names.
#[must_use]
pub fn rename_table_sql(table: &str, new_name: &str) -> String {
    format!("RENAME {table} TO {new_name}")
}

/// Renders `ALTER TABLE .. ADD`.
///
/// # Errors
///
/// Propagates type rendering errors.
pub fn add_column_sql(
    dialect: &OracleDialect,
    table: &str,
    column: &ColumnDefinition,
) -> Result<String> {
    Ok(format!(
        "ALTER TABLE {} ADD {}",
        dialect.quote_table_name(table),
        column.to_sql(dialect)?
    ))
}

/// Renders `ALTER TABLE .. RENAME COLUMN`.
#[must_use]
pub fn rename_column_sql(
    dialect: &OracleDialect,
    table: &str,
    column: &str,
    new_name: &str,
) -> String {
    format!(
        "ALTER TABLE {} RENAME COLUMN {} TO {}",
        dialect.quote_table_name(table),
        dialect.quote_column_name(column),
        dialect.quote_column_name(new_name)
    )
}

/// Renders one `ALTER TABLE .. DROP COLUMN` per column.
#[must_use]
pub fn remove_column_sql<S: AsRef<str>>(
    dialect: &OracleDialect,
    table: &str,
    columns: &[S],
) -> Vec<String> {
    let table = dialect.quote_table_name(table);
    columns
        .iter()
        .map(|column| {
            format!(
                "ALTER TABLE {table} DROP COLUMN {}",
                dialect.quote_column_name(column.as_ref())
            )
        })
        .collect()
}

/// Returns the conventional name of the index on `columns` of `table`.
///
/// ```
/// use oxide_sql_oracle::schema::index_name;
///
/// assert_eq!(index_name("users", &["email"]), "index_users_on_email");
/// ```
#[must_use]
pub fn index_name<S: AsRef<str>>(table: &str, columns: &[S]) -> String {
    let columns: Vec<&str> = columns.iter().map(AsRef::as_ref).collect();
    format!("index_{table}_on_{}", columns.join("_and_"))
}

/// Renders `DROP INDEX`.
#[must_use]
pub fn remove_index_sql(index_name: &str) -> String {
    format!("DROP INDEX {index_name}")
}

/// Renders `ALTER TABLE .. MODIFY` changing a column's type and options.
///
/// # Errors
///
/// Propagates type rendering errors.
pub fn change_column_sql(
    dialect: &OracleDialect,
    table: &str,
    column: &str,
    column_type: ColumnType,
    options: &ColumnOptions,
) -> Result<String> {
    let definition = ColumnDefinition::new(column, column_type).options(options.clone());
    let descriptor = definition.descriptor(dialect)?;
    let mut sql = format!(
        "ALTER TABLE {} MODIFY {} {}",
        dialect.quote_table_name(table),
        dialect.quote_column_name(column),
        descriptor.sql_type.as_deref().unwrap_or_default()
    );
    add_column_options(dialect, &mut sql, options, Some(&descriptor));
    Ok(sql)
}

/// Renders `ALTER TABLE .. MODIFY .. DEFAULT`.
#[must_use]
pub fn change_column_default_sql(
    dialect: &OracleDialect,
    table: &str,
    column: &str,
    default: &SqlValue,
) -> String {
    format!(
        "ALTER TABLE {} MODIFY {} DEFAULT {}",
        dialect.quote_table_name(table),
        dialect.quote_column_name(column),
        dialect.quote(default, None)
    )
}
