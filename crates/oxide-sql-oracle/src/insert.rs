//! Locating the target table of an INSERT.
//!
//! The sequence of a table is named after the table, so an INSERT that needs
//! a generated key must reveal which table it writes to. This is a bounded
//! best-effort scan, not a parser:
//!
//! - the statement must start with `INSERT INTO` (any case);
//! - the third whitespace-separated token is the table, with double quotes
//!   removed and anything from `(` on cut off.
//!
//! A schema-qualified name comes back qualified (`app.users`), so its derived
//! sequence name is wrong; a quoted name keeps its case. Both then surface as
//! an executor error when the sequence is used.

/// Extracts the table named by an `INSERT INTO <table> ...` statement.
///
/// ```
/// use oxide_sql_oracle::insert::extract_table_ref_from_insert_sql;
///
/// assert_eq!(
///     extract_table_ref_from_insert_sql("INSERT INTO users(id, name) VALUES (?, ?)").as_deref(),
///     Some("users")
/// );
/// ```
#[must_use]
pub fn extract_table_ref_from_insert_sql(sql: &str) -> Option<String> {
    let mut tokens = sql.split_whitespace();
    let insert = tokens.next()?;
    let into = tokens.next()?;
    if !insert.eq_ignore_ascii_case("insert") || !into.eq_ignore_ascii_case("into") {
        return None;
    }
    let table = tokens.next()?.replace('"', "");
    let table = match table.find('(') {
        Some(idx) => &table[..idx],
        None => table.as_str(),
    };
    if table.is_empty() {
        return None;
    }
    Some(table.to_string())
}
