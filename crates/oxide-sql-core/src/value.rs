//! SQL values and their value kinds.
//!
//! A [`SqlValue`] carries an explicit kind: dialects dispatch on the variant
//! instead of probing what the value looks like.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::column::{ColumnDescriptor, ColumnType};

/// Database format for instants: `YYYY-MM-DD HH:MM:SS`.
pub const DB_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Database format for calendar dates: `YYYY-MM-DD`.
pub const DB_DATE_FORMAT: &str = "%Y-%m-%d";

/// A SQL value tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value, also used for pre-formatted date strings.
    Text(String),
    /// Binary value.
    Bytes(Vec<u8>),
    /// Point in time, already converted to the database time zone.
    Instant(NaiveDateTime),
    /// Calendar date without a time of day.
    Date(NaiveDate),
}

impl SqlValue {
    /// Returns whether this is `NULL`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns whether the value is NULL, empty or whitespace-only text,
    /// or empty bytes.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Bytes(b) => b.is_empty(),
            _ => false,
        }
    }

    /// Returns whether the value is NULL, empty text or empty bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Bytes(b) => b.is_empty(),
            _ => false,
        }
    }

    /// Returns the plain textual form of the value, `None` for NULL.
    ///
    /// Instants and dates use the database formats.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(n) => Some(n.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
            Self::Instant(t) => Some(t.format(DB_DATETIME_FORMAT).to_string()),
            Self::Date(d) => Some(d.format(DB_DATE_FORMAT).to_string()),
        }
    }

    /// Coerces the value to an integer.
    ///
    /// Text contributes its leading (optionally signed) digits, floats are
    /// truncated and anything else that has no numeric reading yields `0`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_integer(&self) -> i64 {
        match self {
            Self::Int(n) => *n,
            Self::Float(f) => f.trunc() as i64,
            Self::Bool(b) => i64::from(*b),
            Self::Text(s) => leading_integer(s),
            _ => 0,
        }
    }

    /// Renders the value as an integer literal.
    ///
    /// Reads like [`SqlValue::to_integer`], except that text keeps its whole
    /// leading digit run, so keys wider than `i64` are not clamped.
    #[must_use]
    pub fn to_integer_literal(&self) -> String {
        let Self::Text(s) = self else {
            return self.to_integer().to_string();
        };
        let (negative, digits) = leading_digits(s);
        let digits = digits.trim_start_matches('0');
        match (negative, digits.is_empty()) {
            (_, true) => String::from("0"),
            (true, false) => format!("-{digits}"),
            (false, false) => digits.to_string(),
        }
    }
}

fn leading_integer(s: &str) -> i64 {
    let (negative, digits) = leading_digits(s);
    if digits.is_empty() {
        return 0;
    }
    let overflow = if negative { i64::MIN } else { i64::MAX };
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    signed.parse().unwrap_or(overflow)
}

/// Splits the optional sign and the run of digits that starts `s`.
fn leading_digits(s: &str) -> (bool, &str) {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    (negative, &digits[..end])
}

/// A value paired with the column it is destined for.
#[derive(Debug, Clone, Copy)]
pub struct TypedValue<'a> {
    /// The value.
    pub value: &'a SqlValue,
    /// The target column, when known.
    pub column: Option<&'a ColumnDescriptor>,
}

impl<'a> TypedValue<'a> {
    /// Pairs a value with its column.
    #[must_use]
    pub const fn new(value: &'a SqlValue, column: Option<&'a ColumnDescriptor>) -> Self {
        Self { value, column }
    }

    /// Returns the column's type tag, if a column is attached.
    #[must_use]
    pub fn column_type(&self) -> Option<ColumnType> {
        self.column.map(|c| c.column_type)
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

macro_rules! int_to_sql_value {
    ($($ty:ty),*) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::Int(i64::from(self))
                }
            }
        )*
    };
}

int_to_sql_value!(i64, i32, i16, i8, u32, u16, u8);

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bytes(self)
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bytes(self.to_vec())
    }
}

impl ToSqlValue for NaiveDateTime {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Instant(self)
    }
}

impl<Tz: TimeZone> ToSqlValue for DateTime<Tz> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Instant(self.naive_utc())
    }
}

impl ToSqlValue for NaiveDate {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Date(self)
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}
