use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// One municipality row of a territorial unit listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityRef {
    pub code: String,
    pub name: String,
    pub detail_url: Url,
}

/// Turnout counters from the top of a municipality page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub registered: u64,
    pub envelopes: u64,
    pub valid: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyResult {
    pub number: u32,
    pub name: String,
    pub votes: u64,
}

#[derive(Debug, Clone)]
pub struct MunicipalityResult {
    pub municipality: MunicipalityRef,
    pub summary: Summary,
    pub parties: Vec<PartyResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub code: String,
    pub location: String,
    pub summary: Summary,
    pub votes: HashMap<String, u64>,
}

impl OutputRow {
    /// Cell value for a header column; `None` when the row has no such column.
    pub fn field(&self, column: &str) -> Option<String> {
        match column {
            "code" => Some(self.code.clone()),
            "location" => Some(self.location.clone()),
            "registered" => Some(self.summary.registered.to_string()),
            "envelopes" => Some(self.summary.envelopes.to_string()),
            "valid" => Some(self.summary.valid.to_string()),
            party => self.votes.get(party).map(u64::to_string),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScrapeResult {
    pub header: Vec<String>,
    pub rows: Vec<OutputRow>,
}

/// Which party names make it into the output header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ColumnPolicy {
    /// Every party seen in any municipality, in first-seen order.
    #[default]
    Union,
    /// Only the parties of the first municipality. Parties missing there are
    /// dropped from every row.
    FirstRow,
}

/// How the detail link of a listing row is located.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum LinkPolicy {
    /// Numeric code link, then the "X" link, then any link to a results page.
    #[default]
    Rich,
    /// Only the anchor of the first cell.
    FirstCell,
}

/// How party rows are recognised on a municipality page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum PartyStrategy {
    /// `headers` attributes first, cell positions if that finds nothing.
    #[default]
    Auto,
    Headers,
    Positional,
}
