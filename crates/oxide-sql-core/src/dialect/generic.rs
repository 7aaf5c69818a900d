//! Generic SQL dialect.

use super::{Dialect, NativeType};
use crate::column::ColumnType;

/// A generic SQL dialect using ANSI SQL standards.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn native_type(&self, column_type: ColumnType) -> NativeType {
        match column_type {
            ColumnType::PrimaryKey => NativeType::verbatim("INTEGER NOT NULL PRIMARY KEY"),
            ColumnType::String => NativeType::with_limit("VARCHAR", 255),
            ColumnType::Text => NativeType::named("TEXT"),
            ColumnType::Integer => NativeType::named("INTEGER"),
            ColumnType::Float => NativeType::named("FLOAT"),
            ColumnType::Decimal => NativeType::named("DECIMAL"),
            ColumnType::Datetime | ColumnType::Timestamp => NativeType::named("TIMESTAMP"),
            ColumnType::Time => NativeType::named("TIME"),
            ColumnType::Date => NativeType::named("DATE"),
            ColumnType::Binary => NativeType::named("BLOB"),
            ColumnType::Boolean => NativeType::named("BOOLEAN"),
            ColumnType::Raw => NativeType::with_limit("VARBINARY", 255),
            ColumnType::Xml => NativeType::named("XML"),
        }
    }
}
