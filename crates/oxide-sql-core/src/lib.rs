//! # oxide-sql-core
//!
//! Dialect-agnostic building blocks shared by the oxide-sql dialect crates.
//!
//! This crate provides:
//! - [`SqlValue`], a value tagged with an explicit kind (text, instant,
//!   calendar date, bytes, ...), and [`TypedValue`], a value paired with the
//!   column it is bound for
//! - [`ColumnDescriptor`] and the abstract [`ColumnType`] tags produced by
//!   schema introspection
//! - The [`Dialect`] trait whose default methods implement generic identifier
//!   quoting, value quoting and type mapping
//! - The [`Executor`] and [`SchemaIntrospector`] collaborator traits
//!
//! ## Generic quoting
//!
//! ```rust
//! use oxide_sql_core::{Dialect, GenericDialect, SqlValue};
//!
//! let dialect = GenericDialect::new();
//! assert_eq!(dialect.quote_table_name("app.users"), "\"app\".\"users\"");
//! assert_eq!(
//!     dialect.quote(&SqlValue::Text("it's".to_string()), None),
//!     "'it''s'"
//! );
//! ```

pub mod column;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod value;

pub use column::{ColumnDescriptor, ColumnType};
pub use dialect::{Dialect, GenericDialect, NativeType};
pub use error::{DialectError, ExecuteError};
pub use executor::{BoxFuture, Executor, InsertResult, QueryResult, SchemaIntrospector};
pub use value::{SqlValue, ToSqlValue, TypedValue};
