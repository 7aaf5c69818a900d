//! Native Oracle types and identifier limits.

use oxide_sql_core::dialect::render_type;
use oxide_sql_core::{ColumnType, DialectError, NativeType};

use crate::identifier::IDENTIFIER_LENGTH;

/// Longest table alias Oracle accepts.
pub const TABLE_ALIAS_LENGTH: usize = IDENTIFIER_LENGTH;
/// Longest table name Oracle accepts.
pub const TABLE_NAME_LENGTH: usize = IDENTIFIER_LENGTH;
/// Longest index name Oracle accepts.
pub const INDEX_NAME_LENGTH: usize = IDENTIFIER_LENGTH;
/// Longest column name Oracle accepts.
pub const COLUMN_NAME_LENGTH: usize = IDENTIFIER_LENGTH;

/// Maximum number of expressions in an `IN (...)` list (ORA-01795).
pub const IN_CLAUSE_LENGTH: usize = 1000;

/// Oracle declarations for each abstract column type.
///
/// There is no BOOLEAN type, so booleans are emulated with `NUMBER(1)`.
pub const NATIVE_DATABASE_TYPES: [(ColumnType, NativeType); 14] = [
    (
        ColumnType::PrimaryKey,
        NativeType::verbatim("NUMBER(38) NOT NULL PRIMARY KEY"),
    ),
    (ColumnType::String, NativeType::with_limit("VARCHAR2", 255)),
    (ColumnType::Text, NativeType::named("CLOB")),
    (ColumnType::Integer, NativeType::with_limit("NUMBER", 38)),
    (ColumnType::Float, NativeType::named("NUMBER")),
    (ColumnType::Decimal, NativeType::named("DECIMAL")),
    (ColumnType::Datetime, NativeType::named("DATE")),
    (ColumnType::Timestamp, NativeType::named("TIMESTAMP")),
    (ColumnType::Time, NativeType::named("DATE")),
    (ColumnType::Date, NativeType::named("DATE")),
    (ColumnType::Binary, NativeType::named("BLOB")),
    (ColumnType::Boolean, NativeType::with_limit("NUMBER", 1)),
    (ColumnType::Raw, NativeType::with_limit("RAW", 2000)),
    (ColumnType::Xml, NativeType::named("XMLTYPE")),
];

/// Returns the Oracle declaration for `column_type`.
#[must_use]
pub fn native_type(column_type: ColumnType) -> NativeType {
    NATIVE_DATABASE_TYPES
        .iter()
        .find(|(t, _)| *t == column_type)
        .map_or_else(|| NativeType::named("VARCHAR2"), |(_, native)| *native)
}

/// Maps an abstract type to an Oracle declaration.
///
/// `CLOB` and `BLOB` reject a length (`BLOB(1024)` fails with ORA-00907), so
/// limit, precision and scale are dropped for `text` and `binary`.
///
/// # Errors
///
/// Returns [`DialectError::ScaleWithoutPrecision`] for a decimal with a scale
/// but no precision.
pub fn type_to_sql(
    column_type: ColumnType,
    limit: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
) -> Result<String, DialectError> {
    let native = native_type(column_type);
    if column_type.is_lob() {
        render_type(column_type, native, None, None, None)
    } else {
        render_type(column_type, native, limit, precision, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_a_native_entry() {
        for column_type in ColumnType::ALL {
            assert!(
                NATIVE_DATABASE_TYPES.iter().any(|(t, _)| *t == column_type),
                "missing {column_type}"
            );
        }
    }

    #[test]
    fn test_default_declarations() {
        let cases = [
            (ColumnType::PrimaryKey, "NUMBER(38) NOT NULL PRIMARY KEY"),
            (ColumnType::String, "VARCHAR2(255)"),
            (ColumnType::Text, "CLOB"),
            (ColumnType::Integer, "NUMBER(38)"),
            (ColumnType::Float, "NUMBER"),
            (ColumnType::Decimal, "DECIMAL"),
            (ColumnType::Datetime, "DATE"),
            (ColumnType::Timestamp, "TIMESTAMP"),
            (ColumnType::Time, "DATE"),
            (ColumnType::Date, "DATE"),
            (ColumnType::Binary, "BLOB"),
            (ColumnType::Boolean, "NUMBER(1)"),
            (ColumnType::Raw, "RAW(2000)"),
            (ColumnType::Xml, "XMLTYPE"),
        ];
        for (column_type, expected) in cases {
            assert_eq!(type_to_sql(column_type, None, None, None).unwrap(), expected);
        }
    }

    #[test]
    fn test_lob_types_ignore_size() {
        assert_eq!(
            type_to_sql(ColumnType::Binary, Some(1024), None, None).unwrap(),
            "BLOB"
        );
        assert_eq!(
            type_to_sql(ColumnType::Text, Some(4000), Some(10), Some(2)).unwrap(),
            "CLOB"
        );
    }

    #[test]
    fn test_explicit_sizes() {
        assert_eq!(
            type_to_sql(ColumnType::String, Some(50), None, None).unwrap(),
            "VARCHAR2(50)"
        );
        assert_eq!(
            type_to_sql(ColumnType::Raw, Some(16), None, None).unwrap(),
            "RAW(16)"
        );
        assert_eq!(
            type_to_sql(ColumnType::Decimal, None, Some(12), Some(4)).unwrap(),
            "DECIMAL(12,4)"
        );
        assert!(type_to_sql(ColumnType::Decimal, None, None, Some(4)).is_err());
    }

    #[test]
    fn test_identifier_limits() {
        assert_eq!(TABLE_ALIAS_LENGTH, 30);
        assert_eq!(INDEX_NAME_LENGTH, 30);
        assert_eq!(IN_CLAUSE_LENGTH, 1000);
    }
}
