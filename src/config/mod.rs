pub mod cli;
pub mod settings;

use crate::core::ConfigProvider;
use crate::domain::model::{ColumnPolicy, LinkPolicy, PartyStrategy};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_delimiter, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url, Validate,
};
use settings::ScraperSettings;
use std::time::Duration;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "election-scraper", version)]
#[command(about = "Scrapes per-municipality election results from volby.cz into a CSV file")]
pub struct CliConfig {
    /// Territorial unit page listing municipalities (ps32?... under /ps2017nss/)
    pub listing_url: String,

    /// Destination file
    pub output_path: String,

    /// TOML file with http, parsing and output settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Field delimiter [default: ,]
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Which party columns go into the header [default: union]
    #[arg(long, value_enum)]
    pub columns: Option<ColumnPolicy>,

    /// How detail links are found in the listing [default: rich]
    #[arg(long, value_enum)]
    pub links: Option<LinkPolicy>,

    /// How party rows are recognised [default: auto]
    #[arg(long, value_enum)]
    pub parties: Option<PartyStrategy>,

    /// Per-request timeout in seconds [default: 20]
    #[arg(long)]
    pub timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Defaults, then the TOML file, then command line flags.
    pub fn resolve(&self) -> Result<ScraperConfig> {
        let mut settings = match &self.config {
            Some(path) => ScraperSettings::from_file(path)?,
            None => ScraperSettings::default(),
        };

        if let Some(delimiter) = self.delimiter {
            settings.output.delimiter = delimiter;
        }
        if let Some(columns) = self.columns {
            settings.output.columns = columns;
        }
        if let Some(links) = self.links {
            settings.parsing.links = links;
        }
        if let Some(parties) = self.parties {
            settings.parsing.parties = parties;
        }
        if let Some(timeout) = self.timeout {
            settings.http.timeout_seconds = timeout;
        }
        if let Some(user_agent) = &self.user_agent {
            settings.http.user_agent = user_agent.clone();
        }

        Ok(ScraperConfig {
            listing_url: self.listing_url.clone(),
            output_path: self.output_path.clone(),
            settings,
        })
    }
}

/// Fully resolved run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScraperConfig {
    pub listing_url: String,
    pub output_path: String,
    pub settings: ScraperSettings,
}

impl ScraperConfig {
    pub fn new(listing_url: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            listing_url: listing_url.into(),
            output_path: output_path.into(),
            settings: ScraperSettings::default(),
        }
    }
}

impl Validate for ScraperConfig {
    fn validate(&self) -> Result<()> {
        validate_url("listing_url", &self.listing_url)?;
        validate_path("output_path", &self.output_path)?;
        validate_delimiter("delimiter", self.settings.output.delimiter)?;
        validate_positive_number("timeout_seconds", self.settings.http.timeout_seconds, 1)?;
        validate_non_empty_string("user_agent", &self.settings.http.user_agent)?;
        Ok(())
    }
}

impl ConfigProvider for ScraperConfig {
    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn delimiter(&self) -> u8 {
        u8::try_from(self.settings.output.delimiter).unwrap_or(b',')
    }

    fn column_policy(&self) -> ColumnPolicy {
        self.settings.output.columns
    }

    fn link_policy(&self) -> LinkPolicy {
        self.settings.parsing.links
    }

    fn party_strategy(&self) -> PartyStrategy {
        self.settings.parsing.parties
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.settings.http.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.settings.http.user_agent
    }
}
