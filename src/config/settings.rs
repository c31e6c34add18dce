use crate::domain::model::{ColumnPolicy, LinkPolicy, PartyStrategy};
use crate::utils::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; elections-scraper/1.0)";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 20;

/// Tunables that can live in a TOML file. Every section and key is optional.
///
/// ```toml
/// [http]
/// timeout_seconds = 30
/// user_agent = "my-scraper/0.1"
///
/// [parsing]
/// links = "first-cell"
/// parties = "positional"
///
/// [output]
/// delimiter = ";"
/// columns = "first-row"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScraperSettings {
    pub http: HttpSettings,
    pub parsing: ParsingSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpSettings {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParsingSettings {
    pub links: LinkPolicy,
    pub parties: PartyStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub delimiter: char,
    pub columns: ColumnPolicy,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            delimiter: ',',
            columns: ColumnPolicy::Union,
        }
    }
}

impl ScraperSettings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| ScrapeError::Config {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ScrapeError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = ScraperSettings::from_toml_str("").unwrap();

        assert_eq!(settings, ScraperSettings::default());
        assert_eq!(settings.http.timeout_seconds, 20);
        assert_eq!(settings.output.delimiter, ',');
        assert_eq!(settings.output.columns, ColumnPolicy::Union);
        assert_eq!(settings.parsing.links, LinkPolicy::Rich);
        assert_eq!(settings.parsing.parties, PartyStrategy::Auto);
    }

    #[test]
    fn test_partial_sections() {
        let settings = ScraperSettings::from_toml_str(
            r#"
            [parsing]
            links = "first-cell"

            [output]
            delimiter = ";"
            columns = "first-row"
            "#,
        )
        .unwrap();

        assert_eq!(settings.parsing.links, LinkPolicy::FirstCell);
        assert_eq!(settings.parsing.parties, PartyStrategy::Auto);
        assert_eq!(settings.output.delimiter, ';');
        assert_eq!(settings.output.columns, ColumnPolicy::FirstRow);
        assert_eq!(settings.http.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = ScraperSettings::from_toml_str("[http]\nretries = 3\n").unwrap_err();

        assert!(matches!(err, ScrapeError::Config { .. }));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(ScraperSettings::from_toml_str("[output]\ncolumns = \"all\"\n").is_err());
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let err = ScraperSettings::from_file("/nonexistent/scraper.toml").unwrap_err();

        assert_eq!(err.exit_code(), 1);
    }
}
