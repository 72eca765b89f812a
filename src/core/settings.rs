use serde::{Deserialize, Serialize};

use crate::QueryError;

/// Default value of [`SearchSettings::max_clause_count`].
pub const DEFAULT_MAX_CLAUSE_COUNT: usize = 1024;

/// Default value of [`SearchSettings::bucketed_clause_threshold`].
pub const DEFAULT_BUCKETED_CLAUSE_THRESHOLD: usize = 32;

/// Search settings, carried by the [`Searcher`](crate::Searcher) and read
/// while building the weight of a query.
///
/// ```rust
/// use occur::SearchSettings;
///
/// let settings = SearchSettings::from_json(r#"{"max_clause_count": 3}"#).unwrap();
/// assert_eq!(settings.max_clause_count, 3);
/// assert_eq!(settings.bucketed_clause_threshold, 32);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    /// Maximum number of leaf clauses a query may expand to.
    ///
    /// Building the weight of a query exceeding this limit fails with
    /// [`QueryError::TooManyClauses`].
    pub max_clause_count: usize,
    /// A boolean query without required clauses switches to the bucketed
    /// scorer when its number of optional and prohibited clauses exceeds
    /// this value.
    pub bucketed_clause_threshold: usize,
}

impl Default for SearchSettings {
    fn default() -> SearchSettings {
        SearchSettings {
            max_clause_count: DEFAULT_MAX_CLAUSE_COUNT,
            bucketed_clause_threshold: DEFAULT_BUCKETED_CLAUSE_THRESHOLD,
        }
    }
}

impl SearchSettings {
    /// Returns settings with the given `max_clause_count`.
    pub fn with_max_clause_count(max_clause_count: usize) -> crate::Result<SearchSettings> {
        let settings = SearchSettings {
            max_clause_count,
            ..Default::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the settings are usable.
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_clause_count == 0 {
            return Err(QueryError::InvalidArgument(
                "max_clause_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates settings from their json representation.
    ///
    /// Missing fields take their default value.
    pub fn from_json(json: &str) -> crate::Result<SearchSettings> {
        let settings: SearchSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes the settings to json.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::SearchSettings;

    #[test]
    fn test_default_settings() {
        let settings = SearchSettings::default();
        assert_eq!(settings.max_clause_count, 1024);
        assert_eq!(settings.bucketed_clause_threshold, 32);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_json() {
        let settings = SearchSettings {
            max_clause_count: 12,
            bucketed_clause_threshold: 4,
        };
        let json = settings.to_json().unwrap();
        assert_eq!(json, r#"{"max_clause_count":12,"bucketed_clause_threshold":4}"#);
        assert_eq!(SearchSettings::from_json(&json).unwrap(), settings);
        assert_eq!(
            SearchSettings::from_json("{}").unwrap(),
            SearchSettings::default()
        );
    }

    #[test]
    fn test_settings_invalid() {
        assert!(SearchSettings::with_max_clause_count(0).is_err());
        assert!(SearchSettings::from_json(r#"{"max_clause_count":0}"#).is_err());
        assert!(SearchSettings::from_json(r#"{"max_clauses":3}"#).is_err());
        assert!(SearchSettings::from_json("[").is_err());
    }
}
