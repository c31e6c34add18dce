use crate::domain::model::{LinkPolicy, MunicipalityRef};
use crate::html::{Document, Element, TextMode};
use crate::parsing::is_digits;
use crate::utils::error::{Result, ScrapeError};
use url::Url;

/// Path fragments of municipality result pages on volby.cz.
const DETAIL_PATH_FRAGMENTS: [&str; 2] = ["ps311", "ps32"];

/// Parses the municipality table of a territorial unit page.
pub fn parse_listing(body: &str, listing_url: &Url, policy: LinkPolicy) -> Result<Vec<MunicipalityRef>> {
    let document = Document::parse(body);
    parse_municipalities(&document, listing_url, policy)
}

pub fn parse_municipalities(
    document: &Document,
    listing_url: &Url,
    policy: LinkPolicy,
) -> Result<Vec<MunicipalityRef>> {
    let mut municipalities = Vec::new();

    for row in document.find_all("tr") {
        let cells = row.find_all("td");
        if cells.len() < 2 {
            continue;
        }

        let code = match cells[0].find_first("a") {
            Some(anchor) => anchor.text(TextMode::Joined),
            None => cells[0].text(TextMode::Joined),
        };
        if !is_digits(&code) {
            continue;
        }

        let name = cells[1].text(TextMode::Spaced);
        let Some(detail_url) = discover_link(&row, &cells, listing_url, policy) else {
            tracing::debug!("Skipping municipality {} ({}): no detail link", code, name);
            continue;
        };

        municipalities.push(MunicipalityRef {
            code,
            name,
            detail_url,
        });
    }

    if municipalities.is_empty() {
        return Err(ScrapeError::EmptyResult {
            url: listing_url.to_string(),
        });
    }

    Ok(municipalities)
}

fn discover_link(row: &Element<'_>, cells: &[Element<'_>], base: &Url, policy: LinkPolicy) -> Option<Url> {
    let href = match policy {
        LinkPolicy::FirstCell => cells.first().and_then(|cell| cell.find_first("a")).and_then(href_of),
        LinkPolicy::Rich => code_link(cells)
            .or_else(|| selection_link(row))
            .or_else(|| fragment_link(row)),
    }?;

    match base.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!("Ignoring unresolvable link '{}': {}", href, e);
            None
        }
    }
}

fn href_of<'a>(anchor: Element<'a>) -> Option<&'a str> {
    anchor.attr("href").filter(|href| !href.is_empty())
}

/// The municipality code itself, linked, in one of the first two cells.
fn code_link<'a>(cells: &[Element<'a>]) -> Option<&'a str> {
    cells
        .iter()
        .take(2)
        .filter_map(|cell| cell.find_first("a"))
        .find(|anchor| is_digits(&anchor.text(TextMode::Joined)) && href_of(*anchor).is_some())
        .and_then(href_of)
}

/// The "X" link of the ward selection column.
fn selection_link<'a>(row: &Element<'a>) -> Option<&'a str> {
    row.find_all("a")
        .into_iter()
        .find(|anchor| {
            anchor.text(TextMode::Joined).eq_ignore_ascii_case("x") && href_of(*anchor).is_some()
        })
        .and_then(href_of)
}

fn fragment_link<'a>(row: &Element<'a>) -> Option<&'a str> {
    row.find_all("a").into_iter().filter_map(href_of).find(|href| {
        DETAIL_PATH_FRAGMENTS
            .iter()
            .any(|fragment| href.contains(fragment))
    })
}
