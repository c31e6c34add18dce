//! Municipality result page: turnout counters and per-party votes.
//!
//! volby.cz tags every data cell with a `headers` attribute naming its column.
//! The summary table uses bare ids (`sa2` registered voters, `sa3` issued
//! envelopes, `sa6` valid votes). Party tables prefix the ids with the table
//! number (`t1sb1` party number, `t1sb2` name, `t1sb3` votes, `t1sb4` share),
//! and long lists are split over two side-by-side tables (`t1..`, `t2..`).

use crate::domain::model::{PartyResult, PartyStrategy, Summary};
use crate::html::{Document, Element, TextMode};
use crate::parsing::{clean_int, is_digits};
use std::collections::{BTreeMap, HashSet};

const REGISTERED_KEY: &str = "sa2";
const ENVELOPES_KEY: &str = "sa3";
const VALID_KEY: &str = "sa6";

const PARTY_NUMBER_COLUMN: &str = "sb1";
const PARTY_NAME_COLUMN: &str = "sb2";
const PARTY_VOTES_COLUMN: &str = "sb3";

pub fn parse_detail(body: &str, strategy: PartyStrategy) -> (Summary, Vec<PartyResult>) {
    let document = Document::parse(body);
    (parse_summary(&document), parse_parties(&document, strategy))
}

/// Missing counters read as zero.
pub fn parse_summary(document: &Document) -> Summary {
    let counter = |key: &str| {
        document
            .find_first_with_token("td", "headers", key)
            .map(|cell| clean_int(&cell.text(TextMode::Joined)))
            .unwrap_or(0)
    };

    Summary {
        registered: counter(REGISTERED_KEY),
        envelopes: counter(ENVELOPES_KEY),
        valid: counter(VALID_KEY),
    }
}

/// One result per party number, ordered by number.
pub fn parse_parties(document: &Document, strategy: PartyStrategy) -> Vec<PartyResult> {
    match strategy {
        PartyStrategy::Headers => parse_parties_by_headers(document),
        PartyStrategy::Positional => parse_parties_by_position(document),
        PartyStrategy::Auto => {
            let parties = parse_parties_by_headers(document);
            if parties.is_empty() {
                tracing::debug!("No party cells tagged with headers, falling back to cell positions");
                parse_parties_by_position(document)
            } else {
                parties
            }
        }
    }
}

/// Reads rows whose cells carry `headers` ids. The first row seen for a
/// party number wins.
pub fn parse_parties_by_headers(document: &Document) -> Vec<PartyResult> {
    let mut seen = HashSet::new();
    let mut parties = Vec::new();

    for row in document.find_all("tr") {
        let Some(party) = party_from_tagged_row(&row) else {
            continue;
        };
        if seen.insert(party.number) {
            parties.push(party);
        }
    }

    parties.sort_by_key(|party| party.number);
    parties
}

fn party_from_tagged_row(row: &Element<'_>) -> Option<PartyResult> {
    let mut number = None;
    let mut name = None;
    let mut votes = None;

    for cell in row.find_all("td") {
        for column in cell.attr_tokens("headers").filter_map(party_column) {
            match column {
                PARTY_NUMBER_COLUMN => {
                    let text = cell.text(TextMode::Joined);
                    if is_digits(&text) {
                        number = parse_party_number(&text).or(number);
                    }
                }
                PARTY_NAME_COLUMN => name = Some(cell.text(TextMode::Spaced)),
                PARTY_VOTES_COLUMN => votes = Some(clean_int(&cell.text(TextMode::Joined))),
                _ => {}
            }
        }
    }

    Some(PartyResult {
        number: number?,
        name: name.filter(|name| !name.is_empty())?,
        votes: votes?,
    })
}

/// Reads rows as `number | name | votes | ...`. Split tables repeat a party
/// in several rows; the last row for a number wins.
pub fn parse_parties_by_position(document: &Document) -> Vec<PartyResult> {
    let mut by_number: BTreeMap<u32, (String, u64)> = BTreeMap::new();

    for row in document.find_all("tr") {
        let cells = row.find_all("td");
        if cells.len() < 3 {
            continue;
        }

        let number_text = cells[0].text(TextMode::Joined);
        if !is_digits(&number_text) {
            continue;
        }
        let Some(number) = parse_party_number(&number_text) else {
            continue;
        };

        let name = cells[1].text(TextMode::Spaced);

        // A share such as "100,00" fails here on the comma.
        let votes_text: String = cells[2]
            .text(TextMode::Joined)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if !is_digits(&votes_text) {
            continue;
        }

        by_number.insert(number, (name, clean_int(&votes_text)));
    }

    by_number
        .into_iter()
        .map(|(number, (name, votes))| PartyResult {
            number,
            name,
            votes,
        })
        .collect()
}

/// Column id of a party table cell: `t1sb2` gives `sb2`. Bare ids such as
/// the summary table's `sb1` (precinct count) belong to no party table.
fn party_column(token: &str) -> Option<&str> {
    let rest = token.strip_prefix('t')?;
    let column = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    if column.len() == rest.len() || column.is_empty() {
        return None;
    }
    Some(column)
}

fn parse_party_number(text: &str) -> Option<u32> {
    text.parse().ok().filter(|number| *number > 0)
}
