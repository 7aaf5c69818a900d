//! Adapter configuration.

use serde::Deserialize;

use crate::error::Result;
use crate::sequence::DEFAULT_SEQUENCE_START;

/// Connection-level settings of the Oracle adapter.
///
/// ```
/// use oxide_sql_oracle::OracleConfig;
///
/// let config = OracleConfig::from_json(r#"{"username": "scott"}"#).unwrap();
/// assert_eq!(config.schema(), Some("scott"));
/// assert!(config.emulate_booleans);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Schema owning the application's tables.
    pub schema: Option<String>,
    /// Login user; also the schema when none is configured.
    pub username: Option<String>,
    /// Whether booleans are rendered as `1`/`0`.
    pub emulate_booleans: bool,
    /// First value of sequences created without an explicit start.
    pub sequence_start_value: i64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            schema: None,
            username: None,
            emulate_booleans: true,
            sequence_start_value: DEFAULT_SEQUENCE_START,
        }
    }
}

impl OracleConfig {
    /// Parses a configuration from JSON. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OracleError::Config`] for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the schema tables live in.
    ///
    /// In Oracle a schema is the set of objects owned by a user, so the login
    /// user is the fallback.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema
            .as_deref()
            .or(self.username.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}
