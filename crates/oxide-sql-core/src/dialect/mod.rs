//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. This module provides
//! a trait for dialect-specific behavior, with default methods implementing the
//! generic (ANSI-flavoured) rendering that dialects fall back on.

mod generic;

pub use generic::GenericDialect;

use crate::column::{ColumnDescriptor, ColumnType};
use crate::error::DialectError;
use crate::value::{SqlValue, TypedValue};

/// A native type declaration with its default length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeType {
    /// Type name, or the full declaration when `verbatim` is set.
    pub name: &'static str,
    /// Length used when the caller does not give one.
    pub limit: Option<u32>,
    /// Whether `name` is emitted as is, ignoring any length.
    pub verbatim: bool,
}

impl NativeType {
    /// A type rendered as `NAME` or `NAME(limit)`.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            limit: None,
            verbatim: false,
        }
    }

    /// A type with a default length.
    #[must_use]
    pub const fn with_limit(name: &'static str, limit: u32) -> Self {
        Self {
            name,
            limit: Some(limit),
            verbatim: false,
        }
    }

    /// A complete declaration emitted unchanged.
    #[must_use]
    pub const fn verbatim(sql: &'static str) -> Self {
        Self {
            name: sql,
            limit: None,
            verbatim: true,
        }
    }
}

/// Renders a native type declaration.
///
/// `decimal` ignores the length and uses precision and scale instead; every
/// other type uses the explicit length or the native default.
///
/// # Errors
///
/// Returns [`DialectError::ScaleWithoutPrecision`] for a decimal given a
/// scale but no precision.
pub fn render_type(
    column_type: ColumnType,
    native: NativeType,
    limit: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
) -> Result<String, DialectError> {
    if native.verbatim {
        return Ok(native.name.to_string());
    }
    let name = native.name;
    if column_type == ColumnType::Decimal {
        return match (precision, scale) {
            (Some(p), Some(s)) => Ok(format!("{name}({p},{s})")),
            (Some(p), None) => Ok(format!("{name}({p})")),
            (None, Some(_)) => Err(DialectError::ScaleWithoutPrecision { column_type }),
            (None, None) => Ok(name.to_string()),
        };
    }
    Ok(match limit.or(native.limit) {
        Some(limit) => format!("{name}({limit})"),
        None => name.to_string(),
    })
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Quotes a column (or any single) identifier.
    fn quote_column_name(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let doubled = format!("{quote}{quote}");
        let escaped = name.replace(quote, &doubled);
        format!("{quote}{escaped}{quote}")
    }

    /// Quotes a possibly schema-qualified table name.
    fn quote_table_name(&self, name: &str) -> String {
        name.split('.')
            .map(|part| self.quote_column_name(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Escapes a string for use inside single quotes.
    fn quote_string(&self, s: &str) -> String {
        s.replace('\'', "''")
    }

    /// Literal used for `true`.
    fn quoted_true(&self) -> &'static str {
        "TRUE"
    }

    /// Literal used for `false`.
    fn quoted_false(&self) -> &'static str {
        "FALSE"
    }

    /// Renders binary data as a literal.
    fn quote_bytes(&self, bytes: &[u8]) -> String {
        let hex: String = bytes.iter().map(|byte| format!("{byte:02X}")).collect();
        format!("X'{hex}'")
    }

    /// Renders a value as a literal for the given column.
    fn quote(&self, value: &SqlValue, column: Option<&ColumnDescriptor>) -> String {
        self.quote_generic(value, column)
    }

    /// Renders a [`TypedValue`].
    fn quote_typed(&self, typed: TypedValue<'_>) -> String {
        self.quote(typed.value, typed.column)
    }

    /// Generic quoting shared by every dialect.
    ///
    /// Text bound for integer or float columns is coerced to a number, and
    /// booleans bound for integer columns become `1`/`0`.
    fn quote_generic(&self, value: &SqlValue, column: Option<&ColumnDescriptor>) -> String {
        let column_type = column.map(|c| c.column_type);
        match value {
            SqlValue::Null => String::from("NULL"),
            SqlValue::Bool(b) if column_type == Some(ColumnType::Integer) => {
                String::from(if *b { "1" } else { "0" })
            }
            SqlValue::Bool(true) => self.quoted_true().to_string(),
            SqlValue::Bool(false) => self.quoted_false().to_string(),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Float(f) => float_literal(*f),
            SqlValue::Text(s) => match column_type {
                Some(ColumnType::Integer) => value.to_integer_literal(),
                Some(ColumnType::Float) => float_literal(s.trim().parse::<f64>().unwrap_or(0.0)),
                _ => format!("'{}'", self.quote_string(s)),
            },
            SqlValue::Bytes(b) => self.quote_bytes(b),
            SqlValue::Instant(_) | SqlValue::Date(_) => {
                let text = value.to_text().unwrap_or_default();
                format!("'{}'", self.quote_string(&text))
            }
        }
    }

    /// Returns the native type for an abstract column type.
    fn native_type(&self, column_type: ColumnType) -> NativeType;

    /// Maps an abstract column type to a native type declaration.
    ///
    /// # Errors
    ///
    /// See [`render_type`].
    fn type_to_sql(
        &self,
        column_type: ColumnType,
        limit: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> Result<String, DialectError> {
        render_type(
            column_type,
            self.native_type(column_type),
            limit,
            precision,
            scale,
        )
    }

    /// Returns whether the dialect has a native LIMIT/OFFSET clause.
    fn supports_limit_offset(&self) -> bool {
        true
    }
}

/// Renders a float literal; NaN and infinities have none and become `NULL`.
fn float_literal(f: f64) -> String {
    if f.is_finite() {
        f.to_string()
    } else {
        String::from("NULL")
    }
}
