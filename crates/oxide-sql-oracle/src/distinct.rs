//! `SELECT DISTINCT` with an `ORDER BY`.
//!
//! Oracle rejects ordering a distinct select by a column that is not in the
//! select list. Each order term is therefore projected as a `FIRST_VALUE`
//! window over the distinct columns, and the outer query orders by the
//! resulting aliases.

/// Returns the alias given to the `index`-th order term.
#[must_use]
pub fn order_alias(index: usize) -> String {
    format!("alias_{index}__")
}

/// Splits an `ORDER BY` list into trimmed, non-empty terms.
#[must_use]
pub fn extract_order_columns(order_by: &str) -> Vec<&str> {
    order_by
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .collect()
}

/// Splits an order term into its expression and its trimmed direction.
fn split_term(term: &str) -> (&str, Option<&str>) {
    match term.split_once(char::is_whitespace) {
        Some((column, direction)) if !direction.trim().is_empty() => {
            (column, Some(direction.trim()))
        }
        _ => (term, None),
    }
}

/// Builds the select list for a distinct query ordered by `order_by`.
///
/// ```
/// use oxide_sql_oracle::distinct::distinct;
///
/// assert_eq!(distinct("posts.id", ""), "DISTINCT posts.id");
/// assert_eq!(
///     distinct("posts.id", "posts.created_at desc"),
///     "DISTINCT posts.id, FIRST_VALUE(posts.created_at) OVER \
///      (PARTITION BY posts.id ORDER BY posts.created_at desc) AS alias_0__"
/// );
/// ```
#[must_use]
pub fn distinct(columns: &str, order_by: &str) -> String {
    let terms = extract_order_columns(order_by);
    if terms.is_empty() {
        return format!("DISTINCT {columns}");
    }
    let windows: Vec<String> = terms
        .iter()
        .enumerate()
        .map(|(i, term)| {
            let (bare, _) = split_term(term);
            format!(
                "FIRST_VALUE({bare}) OVER (PARTITION BY {columns} ORDER BY {term}) AS {}",
                order_alias(i)
            )
        })
        .collect();
    format!("DISTINCT {columns}, {}", windows.join(", "))
}

/// Appends an `ORDER BY` on the aliases produced by [`distinct`].
///
/// Each alias keeps the direction of its term, i.e. whatever follows the
/// first whitespace. A missing or blank `order_by` leaves `sql` unchanged.
pub fn add_order_by_for_association_limiting(sql: &mut String, order_by: Option<&str>) {
    let terms = extract_order_columns(order_by.unwrap_or_default());
    if terms.is_empty() {
        return;
    }
    let entries: Vec<String> = terms
        .iter()
        .enumerate()
        .map(|(i, term)| match split_term(term) {
            (_, Some(direction)) => format!("{} {direction}", order_alias(i)),
            (_, None) => order_alias(i),
        })
        .collect();
    sql.push_str(" ORDER BY ");
    sql.push_str(&entries.join(", "));
}
