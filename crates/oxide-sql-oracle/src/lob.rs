//! Writing LOB content after a row is saved.
//!
//! Inserts and updates put `empty_clob()`/`empty_blob()` in LOB columns; the
//! content itself is streamed afterwards through a [`LobWriter`].

use std::sync::LazyLock;

use oxide_sql_core::{BoxFuture, ColumnDescriptor, ExecuteError, SqlValue};
use regex::Regex;
use tracing::debug;

use crate::error::Result;

static LOB_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)LOB\(|LOB$").expect("LOB type pattern is a valid regex"));

/// Writes the content of one LOB column of one row.
pub trait LobWriter: Send + Sync {
    /// Replaces the LOB in `column` of the row of `table` whose key is `id`.
    fn update_lob_value<'a>(
        &'a self,
        table: &'a str,
        id: &'a SqlValue,
        column: &'a ColumnDescriptor,
        value: &'a SqlValue,
    ) -> BoxFuture<'a, std::result::Result<(), ExecuteError>>;
}

/// Returns the columns stored as LOBs, judged by their native type.
#[must_use]
pub fn lob_columns(columns: &[ColumnDescriptor]) -> impl Iterator<Item = &ColumnDescriptor> {
    columns.iter().filter(|column| {
        column
            .sql_type
            .as_deref()
            .is_some_and(|sql_type| LOB_TYPE.is_match(sql_type))
    })
}

/// Writes every non-empty LOB value of a saved row.
///
/// `values` pairs column names with the row's values; names match
/// case-insensitively. Returns the number of LOBs written.
///
/// # Errors
///
/// Stops at and returns the first writer error.
pub async fn write_lobs<W: LobWriter + ?Sized>(
    writer: &W,
    table: &str,
    id: &SqlValue,
    columns: &[ColumnDescriptor],
    values: &[(String, SqlValue)],
) -> Result<usize> {
    let mut written = 0;
    for column in lob_columns(columns) {
        let value = values
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&column.name))
            .map(|(_, value)| value);
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            continue;
        };
        debug!(table = %table, column = %column.name, "Writing LOB value");
        writer.update_lob_value(table, id, column, value).await?;
        written += 1;
    }
    Ok(written)
}
