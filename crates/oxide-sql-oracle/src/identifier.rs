//! Identifier quoting.
//!
//! Oracle folds unquoted identifiers to upper case and matches quoted ones
//! exactly. A name made only of lowercase-safe characters is therefore
//! upper-cased before quoting, which keeps it matching the unquoted spelling;
//! anything else is quoted verbatim so its case survives.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use regex::Regex;

/// Maximum length of an Oracle identifier.
pub const IDENTIFIER_LENGTH: usize = 30;

static LOWERCASE_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[a-z][a-z_0-9$#]*\z").expect("identifier pattern is a valid regex")
});

/// Quotes a single identifier (no caching).
///
/// ```
/// use oxide_sql_oracle::identifier::quote_column_name;
///
/// assert_eq!(quote_column_name("created_at"), "\"CREATED_AT\"");
/// assert_eq!(quote_column_name("CamelCase"), "\"CamelCase\"");
/// ```
#[must_use]
pub fn quote_column_name(name: &str) -> String {
    if LOWERCASE_IDENTIFIER.is_match(name) {
        format!("\"{}\"", name.to_ascii_uppercase())
    } else {
        // double quotes cannot appear inside a quoted identifier
        format!("\"{}\"", name.replace('"', ""))
    }
}

/// Quotes a table reference of the form `[schema.]table[@dblink]`
/// (no caching).
#[must_use]
pub fn quote_table_name(name: &str) -> String {
    quote_table_name_with(name, quote_column_name)
}

fn quote_table_name_with(name: &str, mut quote: impl FnMut(&str) -> String) -> String {
    name.split('.')
        .map(|segment| {
            segment
                .split('@')
                .map(&mut quote)
                .collect::<Vec<_>>()
                .join("@")
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Cache from raw identifiers to their quoted form.
///
/// Entries are never replaced or evicted. Concurrent misses for the same name
/// may both compute the quoted form; the first insert wins and both callers
/// see the same string.
#[derive(Debug, Default)]
pub struct QuotedNameCache {
    entries: DashMap<String, Arc<str>>,
}

impl QuotedNameCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached form of `raw`, computing it with `quote` on a miss.
    pub fn get_or_insert_with(&self, raw: &str, quote: impl FnOnce(&str) -> String) -> Arc<str> {
        if let Some(hit) = self.entries.get(raw) {
            return Arc::clone(hit.value());
        }
        let quoted: Arc<str> = Arc::from(quote(raw));
        Arc::clone(self.entries.entry(raw.to_string()).or_insert(quoted).value())
    }

    /// Returns the cached form of `raw` without computing it.
    #[must_use]
    pub fn get(&self, raw: &str) -> Option<Arc<str>> {
        self.entries.get(raw).map(|hit| Arc::clone(hit.value()))
    }

    /// Returns the number of cached names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Caching identifier quoter.
///
/// Clones share the same caches, so one quoter can be handed to every
/// connection of a pool.
#[derive(Debug, Clone, Default)]
pub struct IdentifierQuoter {
    columns: Arc<QuotedNameCache>,
    tables: Arc<QuotedNameCache>,
}

impl IdentifierQuoter {
    /// Creates a quoter with empty caches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Quotes a column name, consulting the column cache.
    pub fn quote_column_name(&self, name: &str) -> Arc<str> {
        self.columns.get_or_insert_with(name, quote_column_name)
    }

    /// Quotes a table reference, consulting the table cache.
    ///
    /// Each atom goes through the column cache as well.
    pub fn quote_table_name(&self, name: &str) -> Arc<str> {
        self.tables.get_or_insert_with(name, |raw| {
            quote_table_name_with(raw, |atom| self.quote_column_name(atom).to_string())
        })
    }

    /// Returns the column-name cache.
    #[must_use]
    pub fn column_cache(&self) -> &QuotedNameCache {
        &self.columns
    }

    /// Returns the table-name cache.
    #[must_use]
    pub fn table_cache(&self) -> &QuotedNameCache {
        &self.tables
    }
}
