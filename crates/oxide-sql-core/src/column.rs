//! Column metadata as reported by schema introspection.

use core::fmt;
use core::str::FromStr;

use crate::error::DialectError;

/// Abstract column type tag.
///
/// Every dialect maps these onto its own native type declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Surrogate primary key.
    PrimaryKey,
    /// Bounded character data.
    String,
    /// Unbounded character data.
    Text,
    /// Integer number.
    Integer,
    /// Floating point number.
    Float,
    /// Exact decimal number.
    Decimal,
    /// Date and time of day.
    Datetime,
    /// Date and time of day with fractional seconds.
    Timestamp,
    /// Time of day.
    Time,
    /// Calendar date.
    Date,
    /// Unbounded binary data.
    Binary,
    /// True/false flag.
    Boolean,
    /// Bounded binary data written as hex.
    Raw,
    /// XML document.
    Xml,
}

impl ColumnType {
    /// All column types, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::PrimaryKey,
        Self::String,
        Self::Text,
        Self::Integer,
        Self::Float,
        Self::Decimal,
        Self::Datetime,
        Self::Timestamp,
        Self::Time,
        Self::Date,
        Self::Binary,
        Self::Boolean,
        Self::Raw,
        Self::Xml,
    ];

    /// Returns the lowercase tag name (`"primary_key"`, `"string"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryKey => "primary_key",
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Datetime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Time => "time",
            Self::Date => "date",
            Self::Binary => "binary",
            Self::Boolean => "boolean",
            Self::Raw => "raw",
            Self::Xml => "xml",
        }
    }

    /// Returns whether values of this type are stored as large objects.
    #[must_use]
    pub const fn is_lob(self) -> bool {
        matches!(self, Self::Text | Self::Binary)
    }

    /// Returns whether values of this type are numbers.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::PrimaryKey | Self::Integer | Self::Float | Self::Decimal
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| DialectError::UnknownColumnType(s.to_string()))
    }
}

/// Metadata for a single table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Abstract type tag.
    pub column_type: ColumnType,
    /// Native type declaration, e.g. `VARCHAR2(255)` or `CLOB`.
    pub sql_type: Option<String>,
    /// Declared length.
    pub limit: Option<u32>,
    /// Declared precision.
    pub precision: Option<u32>,
    /// Declared scale.
    pub scale: Option<u32>,
    /// Whether the column is (part of) the primary key.
    pub primary: bool,
    /// Whether the column accepts NULL.
    pub nullable: bool,
}

impl ColumnDescriptor {
    /// Creates a nullable, non-key column with no native type information.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            sql_type: None,
            limit: None,
            precision: None,
            scale: None,
            primary: false,
            nullable: true,
        }
    }

    /// Sets the native type declaration.
    #[must_use]
    pub fn sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = Some(sql_type.into());
        self
    }

    /// Sets the declared length.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the declared precision and scale.
    #[must_use]
    pub const fn precision(mut self, precision: u32, scale: Option<u32>) -> Self {
        self.precision = Some(precision);
        self.scale = scale;
        self
    }

    /// Marks the column as the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary = true;
        self.nullable = false;
        self
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Returns whether this is a primary key backed by a number.
    #[must_use]
    pub const fn has_numeric_key(&self) -> bool {
        self.primary && self.column_type.is_numeric()
    }
}
