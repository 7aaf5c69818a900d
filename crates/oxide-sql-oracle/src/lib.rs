//! # oxide-sql-oracle
//!
//! Oracle-specific extensions for `oxide-sql-core`.
//!
//! # How Oracle differs from other dialects
//!
//! - **[Identifier case folding]**: unquoted identifiers are folded to upper
//!   case, quoted ones match exactly. [`OracleDialect`] upper-cases names made
//!   only of lowercase-safe characters before quoting them and keeps every
//!   other name verbatim. Quoted names are cached per dialect.
//! - **No `LIMIT`/`OFFSET`** (before 12c): pagination wraps the query and
//!   filters on the [`ROWNUM`] pseudo-column, see [`pagination`].
//! - **No auto-increment**: surrogate keys come from a [sequence] named
//!   `<table>_seq`, created and dropped with the table, see [`sequence`].
//! - **`DISTINCT` with `ORDER BY`**: order columns must appear in the select
//!   list, so they are projected through `FIRST_VALUE` windows, see
//!   [`distinct`].
//! - **LOBs**: `CLOB`/`BLOB` columns cannot be declared with a length and are
//!   initialised with `empty_clob()`/`empty_blob()`; their content is written
//!   after the row, see [`lob`].
//! - **No `BOOLEAN`**: booleans are `NUMBER(1)` holding `1`/`0`.
//! - **30-character identifiers**: sequence, table, index and column names
//!   are limited to 30 characters; `IN` lists to 1000 expressions.
//! - **No `RELEASE SAVEPOINT`**: releasing a savepoint is a no-op.
//!
//! [Identifier case folding]: https://docs.oracle.com/en/database/oracle/oracle-database/19/sqlrf/Database-Object-Names-and-Qualifiers.html
//! [`ROWNUM`]: https://docs.oracle.com/en/database/oracle/oracle-database/19/sqlrf/ROWNUM-Pseudocolumn.html
//! [sequence]: https://docs.oracle.com/en/database/oracle/oracle-database/19/sqlrf/CREATE-SEQUENCE.html
//!
//! ## Example
//!
//! ```rust
//! use oxide_sql_core::{ColumnDescriptor, ColumnType, Dialect, SqlValue};
//! use oxide_sql_oracle::{OracleDialect, PaginationSpec};
//!
//! let dialect = OracleDialect::new();
//! assert_eq!(dialect.quote_table_name("app.posts"), "\"APP\".\"POSTS\"");
//!
//! let body = ColumnDescriptor::new("body", ColumnType::Text).sql_type("CLOB");
//! assert_eq!(dialect.quote(&SqlValue::Null, Some(&body)), "empty_clob()");
//!
//! let mut sql = String::from("SELECT * FROM posts");
//! dialect.add_limit_offset(&mut sql, &PaginationSpec::new().limit(10).offset(20));
//! assert!(sql.contains("ROWNUM <= 30"));
//! ```

pub mod adapter;
pub mod config;
mod dialect;
pub mod distinct;
pub mod error;
pub mod identifier;
pub mod insert;
pub mod lob;
pub mod pagination;
pub mod quoting;
pub mod schema;
pub mod sequence;
pub mod types;

pub use adapter::{InsertOptions, OracleAdapter};
pub use config::OracleConfig;
pub use dialect::OracleDialect;
pub use error::{OracleError, Result};
pub use identifier::{IdentifierQuoter, QuotedNameCache};
pub use lob::LobWriter;
pub use pagination::PaginationSpec;
pub use schema::{ColumnDefinition, ColumnOptions, TableDefinition};
pub use sequence::{CreateTableOptions, DropTableOptions, SequenceDescriptor, SequenceManager};
