use crate::domain::model::{ColumnPolicy, MunicipalityResult, OutputRow, PartyResult, ScrapeResult};
use std::collections::{HashMap, HashSet};

pub const FIXED_COLUMNS: [&str; 5] = ["code", "location", "registered", "envelopes", "valid"];

/// Collects party columns across municipalities according to a [`ColumnPolicy`].
#[derive(Debug, Default)]
pub struct HeaderAccumulator {
    policy: ColumnPolicy,
    party_columns: Vec<String>,
    seen: HashSet<String>,
    locked: bool,
}

impl HeaderAccumulator {
    pub fn new(policy: ColumnPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn observe(&mut self, parties: &[PartyResult]) {
        if self.locked {
            return;
        }

        for party in parties {
            if FIXED_COLUMNS.contains(&party.name.as_str()) {
                tracing::warn!(
                    "Party {} is named like a fixed column and will not be written",
                    party.number
                );
                continue;
            }
            if self.seen.insert(party.name.clone()) {
                self.party_columns.push(party.name.clone());
            }
        }

        if self.policy == ColumnPolicy::FirstRow {
            self.locked = true;
        }
    }

    pub fn party_columns(&self) -> &[String] {
        &self.party_columns
    }

    pub fn into_header(self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(|column| column.to_string())
            .chain(self.party_columns)
            .collect()
    }
}

pub fn build_row(result: &MunicipalityResult) -> OutputRow {
    let votes: HashMap<String, u64> = result
        .parties
        .iter()
        .map(|party| (party.name.clone(), party.votes))
        .collect();

    OutputRow {
        code: result.municipality.code.clone(),
        location: result.municipality.name.clone(),
        summary: result.summary,
        votes,
    }
}

/// Builds the header and one row per municipality, in input order.
pub fn aggregate(results: &[MunicipalityResult], policy: ColumnPolicy) -> ScrapeResult {
    let mut header = HeaderAccumulator::new(policy);
    let mut rows = Vec::with_capacity(results.len());

    for result in results {
        header.observe(&result.parties);
        rows.push(build_row(result));
    }

    if policy == ColumnPolicy::FirstRow {
        let dropped: HashSet<&str> = results
            .iter()
            .flat_map(|result| result.parties.iter().map(|party| party.name.as_str()))
            .filter(|name| !FIXED_COLUMNS.contains(name))
            .filter(|name| !header.party_columns().iter().any(|column| column.as_str() == *name))
            .collect();
        if !dropped.is_empty() {
            tracing::warn!(
                "{} parties are missing from the first municipality and will not be written",
                dropped.len()
            );
        }
    }

    ScrapeResult {
        header: header.into_header(),
        rows,
    }
}
