//! Oracle dialect implementation.

use oxide_sql_core::dialect::Dialect;
use oxide_sql_core::{ColumnDescriptor, ColumnType, DialectError, NativeType, SqlValue};

use crate::config::OracleConfig;
use crate::identifier::IdentifierQuoter;
use crate::pagination::{self, PaginationSpec};
use crate::quoting;
use crate::sequence;
use crate::types::{self, IN_CLAUSE_LENGTH};

/// Oracle dialect.
///
/// Clones share the identifier caches.
#[derive(Debug, Clone)]
pub struct OracleDialect {
    quoter: IdentifierQuoter,
    emulate_booleans: bool,
}

impl Default for OracleDialect {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::unused_self)]
impl OracleDialect {
    /// Creates a dialect with empty caches and boolean emulation enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            quoter: IdentifierQuoter::new(),
            emulate_booleans: true,
        }
    }

    /// Creates a dialect configured by `config`.
    #[must_use]
    pub fn from_config(config: &OracleConfig) -> Self {
        Self::new().emulate_booleans(config.emulate_booleans)
    }

    /// Enables or disables rendering booleans as `1`/`0`.
    #[must_use]
    pub const fn emulate_booleans(mut self, emulate: bool) -> Self {
        self.emulate_booleans = emulate;
        self
    }

    /// Returns whether booleans are rendered as `1`/`0`.
    #[must_use]
    pub const fn emulates_booleans(&self) -> bool {
        self.emulate_booleans
    }

    /// Returns the identifier quoter backing this dialect.
    #[must_use]
    pub const fn quoter(&self) -> &IdentifierQuoter {
        &self.quoter
    }

    /// See [`crate::distinct::distinct`].
    #[must_use]
    pub fn distinct(&self, columns: &str, order_by: &str) -> String {
        crate::distinct::distinct(columns, order_by)
    }

    /// See [`crate::distinct::add_order_by_for_association_limiting`].
    pub fn add_order_by_for_association_limiting(&self, sql: &mut String, order_by: Option<&str>) {
        crate::distinct::add_order_by_for_association_limiting(sql, order_by);
    }

    /// See [`pagination::add_limit_offset`].
    pub fn add_limit_offset(&self, sql: &mut String, spec: &PaginationSpec) {
        pagination::add_limit_offset(sql, spec);
    }

    /// See [`sequence::default_sequence_name`].
    #[must_use]
    pub fn default_sequence_name(&self, table_name: &str) -> String {
        sequence::default_sequence_name(table_name)
    }

    /// Maximum number of expressions in an `IN (...)` list.
    #[must_use]
    pub const fn in_clause_length(&self) -> usize {
        IN_CLAUSE_LENGTH
    }

    /// Oracle has no `RELEASE SAVEPOINT`; releasing is a no-op.
    pub const fn release_savepoint(&self, _name: &str) {}

    /// Savepoints can be created and rolled back to.
    #[must_use]
    pub const fn supports_savepoints(&self) -> bool {
        true
    }

    /// Schema migrations are supported.
    #[must_use]
    pub const fn supports_migrations(&self) -> bool {
        true
    }

    /// Primary keys are supported.
    #[must_use]
    pub const fn supports_primary_key(&self) -> bool {
        true
    }

    /// `EXPLAIN PLAN` is supported.
    #[must_use]
    pub const fn supports_explain(&self) -> bool {
        true
    }
}

impl Dialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn quote_column_name(&self, name: &str) -> String {
        self.quoter.quote_column_name(name).to_string()
    }

    fn quote_table_name(&self, name: &str) -> String {
        self.quoter.quote_table_name(name).to_string()
    }

    fn quoted_true(&self) -> &'static str {
        if self.emulate_booleans {
            "1"
        } else {
            "'t'"
        }
    }

    fn quoted_false(&self) -> &'static str {
        if self.emulate_booleans {
            "0"
        } else {
            "'f'"
        }
    }

    fn quote_bytes(&self, bytes: &[u8]) -> String {
        format!("'{}'", quoting::hex(bytes))
    }

    fn quote(&self, value: &SqlValue, column: Option<&ColumnDescriptor>) -> String {
        quoting::quote_value(self, value, column)
    }

    fn native_type(&self, column_type: ColumnType) -> NativeType {
        types::native_type(column_type)
    }

    fn type_to_sql(
        &self,
        column_type: ColumnType,
        limit: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Result<String, DialectError> {
        types::type_to_sql(column_type, limit, precision, scale)
    }

    fn supports_limit_offset(&self) -> bool {
        false
    }
}
