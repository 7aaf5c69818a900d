//! Value quoting.
//!
//! Renders [`SqlValue`]s as Oracle literals. Dispatch is on the column's type
//! tag first and on the value's kind second; anything without an Oracle
//! specific rendering falls back to [`Dialect::quote_generic`].

use std::sync::LazyLock;

use oxide_sql_core::value::DB_DATETIME_FORMAT;
use oxide_sql_core::{ColumnDescriptor, ColumnType, Dialect, SqlValue};
use regex::Regex;

/// Format model matching [`DB_DATETIME_FORMAT`] for `TO_DATE`.
pub const TO_DATE_FORMAT: &str = "YYYY-MM-DD HH24:MI:SS";

static SIZED_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\([0-9]+\)").expect("sized type pattern is a valid regex"));

/// Quotes `value` for insertion into `column`.
pub fn quote_value<D: Dialect + ?Sized>(
    dialect: &D,
    value: &SqlValue,
    column: Option<&ColumnDescriptor>,
) -> String {
    let column_type = column.map(|c| c.column_type);

    if let Some(column) = column.filter(|c| c.column_type.is_lob()) {
        if value.is_empty() {
            return empty_lob(column);
        }
    }
    if value.is_null() {
        return String::from("NULL");
    }

    match (column_type, value) {
        (Some(ColumnType::Xml), _) => {
            let text = value.to_text().unwrap_or_default();
            format!("XMLTYPE('{}')", dialect.quote_string(&text))
        }
        (Some(ColumnType::Raw), _) => quote_raw(value),
        _ if column.is_some_and(ColumnDescriptor::has_numeric_key) => value.to_integer_literal(),
        (Some(ColumnType::Datetime | ColumnType::Time), SqlValue::Instant(t)) => format!(
            "TO_DATE('{}','{TO_DATE_FORMAT}')",
            t.format(DB_DATETIME_FORMAT)
        ),
        (Some(ColumnType::Datetime | ColumnType::Time), _) => {
            preformatted(dialect, "DATE", value)
        }
        (_, SqlValue::Date(_)) | (Some(ColumnType::Date), _) => match value {
            SqlValue::Instant(t) => format!("DATE'{}'", t.format("%Y-%m-%d")),
            SqlValue::Date(_) => format!("DATE'{}'", quoted_date(value, Some(false))),
            _ => preformatted(dialect, "DATE", value),
        },
        (_, SqlValue::Instant(_)) => format!("TIMESTAMP'{}'", quoted_date(value, Some(true))),
        (Some(ColumnType::Timestamp), _) => preformatted(dialect, "TIMESTAMP", value),
        _ => dialect.quote_generic(value, column),
    }
}

/// Wraps a value assumed to be formatted already in a typed literal, or
/// returns `NULL` for a blank value.
fn preformatted<D: Dialect + ?Sized>(dialect: &D, keyword: &str, value: &SqlValue) -> String {
    match value.to_text() {
        Some(text) if !value.is_blank() => format!("{keyword}'{}'", dialect.quote_string(&text)),
        _ => String::from("NULL"),
    }
}

/// Returns the empty LOB constructor for a CLOB or BLOB column.
///
/// The constructor is derived from the native type (`CLOB` gives
/// `empty_clob()`), ignoring a trailing length. Columns without a native type
/// default to `empty_blob()`.
#[must_use]
pub fn empty_lob(column: &ColumnDescriptor) -> String {
    let kind = column.sql_type.as_deref().map_or_else(
        || String::from("blob"),
        |sql_type| {
            SIZED_TYPE
                .captures(sql_type)
                .and_then(|caps| caps.get(1))
                .map_or(sql_type, |m| m.as_str())
                .to_lowercase()
        },
    );
    format!("empty_{kind}()")
}

/// Formats a date or instant in the database format.
///
/// `with_fraction` asks for hundredths of a second; `None` means "when the
/// value has a time of day". The hundredths are the microseconds divided by
/// 10,000 and rounded, capped at 99 so they stay two digits.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quoted_date(value: &SqlValue, with_fraction: Option<bool>) -> String {
    match value {
        SqlValue::Instant(t) if with_fraction.unwrap_or(true) => {
            let micros = t.and_utc().timestamp_subsec_micros();
            let hundredths = (f64::from(micros) / 10_000.0).round().min(99.0) as u32;
            format!("{}.{hundredths:02}", t.format(DB_DATETIME_FORMAT))
        }
        _ => value.to_text().unwrap_or_default(),
    }
}

/// Renders a value as an Oracle RAW literal: uppercase hex in single quotes.
///
/// Text is encoded as its UTF-8 bytes.
#[must_use]
pub fn quote_raw(value: &SqlValue) -> String {
    let bytes: Vec<u8> = match value {
        SqlValue::Bytes(b) => b.clone(),
        other => other.to_text().unwrap_or_default().into_bytes(),
    };
    format!("'{}'", hex(&bytes))
}

pub(crate) fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02X}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use oxide_sql_core::GenericDialect;

    fn instant(micros: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_micro_opt(13, 45, 9, micros)
            .unwrap()
    }

    fn quote(value: &SqlValue, column: Option<&ColumnDescriptor>) -> String {
        quote_value(&GenericDialect::new(), value, column)
    }

    fn text(s: &str) -> SqlValue {
        SqlValue::Text(String::from(s))
    }

    #[test]
    fn test_empty_lobs() {
        let clob = ColumnDescriptor::new("body", ColumnType::Text).sql_type("CLOB");
        let blob = ColumnDescriptor::new("data", ColumnType::Binary).sql_type("BLOB");
        assert_eq!(quote(&SqlValue::Null, Some(&clob)), "empty_clob()");
        assert_eq!(quote(&text(""), Some(&clob)), "empty_clob()");
        assert_eq!(quote(&SqlValue::Null, Some(&blob)), "empty_blob()");
        assert_eq!(quote(&SqlValue::Bytes(vec![]), Some(&blob)), "empty_blob()");
    }

    #[test]
    fn test_empty_lob_name_variants() {
        let sized = ColumnDescriptor::new("data", ColumnType::Binary).sql_type("BLOB(4000)");
        let untyped = ColumnDescriptor::new("data", ColumnType::Binary);
        let nclob = ColumnDescriptor::new("body", ColumnType::Text).sql_type("NCLOB");
        assert_eq!(empty_lob(&sized), "empty_blob()");
        assert_eq!(empty_lob(&untyped), "empty_blob()");
        assert_eq!(empty_lob(&nclob), "empty_nclob()");
    }

    #[test]
    fn test_non_empty_lob_uses_generic_quoting() {
        let clob = ColumnDescriptor::new("body", ColumnType::Text).sql_type("CLOB");
        assert_eq!(quote(&text("it's long"), Some(&clob)), "'it''s long'");
    }

    #[test]
    fn test_xml() {
        let xml = ColumnDescriptor::new("doc", ColumnType::Xml);
        assert_eq!(
            quote(&text("<a b='c'/>"), Some(&xml)),
            "XMLTYPE('<a b=''c''/>')"
        );
    }

    #[test]
    fn test_raw() {
        assert_eq!(quote_raw(&text("AB")), "'4142'");
        assert_eq!(quote_raw(&SqlValue::Bytes(vec![0, 15, 255])), "'000FFF'");
        let raw = ColumnDescriptor::new("hash", ColumnType::Raw);
        assert_eq!(quote(&text("AB"), Some(&raw)), "'4142'");
    }

    #[test]
    fn test_numeric_primary_key() {
        let id = ColumnDescriptor::new("id", ColumnType::Integer).primary_key();
        assert_eq!(quote(&text("42"), Some(&id)), "42");
        assert_eq!(quote(&SqlValue::Float(7.9), Some(&id)), "7");
        assert_eq!(quote(&SqlValue::Null, Some(&id)), "NULL");
        assert_eq!(
            quote(&text("99999999999999999999"), Some(&id)),
            "99999999999999999999"
        );
        assert_eq!(
            quote(&text("-123456789012345678901234567890"), Some(&id)),
            "-123456789012345678901234567890"
        );

        let code = ColumnDescriptor::new("code", ColumnType::String).primary_key();
        assert_eq!(quote(&text("42"), Some(&code)), "'42'");
    }

    #[test]
    fn test_datetime_columns() {
        let datetime = ColumnDescriptor::new("posted_at", ColumnType::Datetime);
        let time = ColumnDescriptor::new("opens_at", ColumnType::Time);
        assert_eq!(
            quote(&SqlValue::Instant(instant(250_000)), Some(&datetime)),
            "TO_DATE('2024-05-17 13:45:09','YYYY-MM-DD HH24:MI:SS')"
        );
        assert_eq!(
            quote(&SqlValue::Instant(instant(0)), Some(&time)),
            "TO_DATE('2024-05-17 13:45:09','YYYY-MM-DD HH24:MI:SS')"
        );
        assert_eq!(
            quote(&text("2024-05-17"), Some(&datetime)),
            "DATE'2024-05-17'"
        );
        assert_eq!(quote(&text("  "), Some(&datetime)), "NULL");
        assert_eq!(quote(&SqlValue::Null, Some(&datetime)), "NULL");
    }

    #[test]
    fn test_date_columns_and_values() {
        let date_column = ColumnDescriptor::new("born_on", ColumnType::Date);
        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(
            quote(&SqlValue::Instant(instant(0)), Some(&date_column)),
            "DATE'2024-05-17'"
        );
        assert_eq!(
            quote(&SqlValue::Date(date), Some(&date_column)),
            "DATE'1999-12-31'"
        );
        assert_eq!(quote(&SqlValue::Date(date), None), "DATE'1999-12-31'");
        assert_eq!(
            quote(&text("2000-01-01"), Some(&date_column)),
            "DATE'2000-01-01'"
        );
        assert_eq!(quote(&text(""), Some(&date_column)), "NULL");
    }

    #[test]
    fn test_timestamps() {
        let column = ColumnDescriptor::new("seen_at", ColumnType::Timestamp);
        assert_eq!(
            quote(&SqlValue::Instant(instant(428_000)), Some(&column)),
            "TIMESTAMP'2024-05-17 13:45:09.43'"
        );
        assert_eq!(
            quote(&SqlValue::Instant(instant(0)), None),
            "TIMESTAMP'2024-05-17 13:45:09.00'"
        );
        assert_eq!(
            quote(&text("2024-05-17 13:45:09.5"), Some(&column)),
            "TIMESTAMP'2024-05-17 13:45:09.5'"
        );
        assert_eq!(quote(&text(""), Some(&column)), "NULL");
    }

    #[test]
    fn test_quoted_date_fraction() {
        let value = SqlValue::Instant(instant(428_000));
        assert_eq!(quoted_date(&value, None), "2024-05-17 13:45:09.43");
        assert_eq!(quoted_date(&value, Some(false)), "2024-05-17 13:45:09");
        assert_eq!(
            quoted_date(&SqlValue::Instant(instant(4_999)), Some(true)),
            "2024-05-17 13:45:09.00"
        );
        assert_eq!(
            quoted_date(&SqlValue::Instant(instant(999_999)), Some(true)),
            "2024-05-17 13:45:09.99"
        );
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(quoted_date(&SqlValue::Date(date), Some(true)), "2024-02-29");
    }

    #[test]
    fn test_fallback_is_generic() {
        assert_eq!(quote(&text("plain"), None), "'plain'");
        assert_eq!(quote(&SqlValue::Int(5), None), "5");
        let name = ColumnDescriptor::new("name", ColumnType::String);
        assert_eq!(quote(&text("O'Neil"), Some(&name)), "'O''Neil'");
    }
}
