use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use scraper::Html;
use tracing::{debug, info, warn};

use crate::fetch::Fetch;
use crate::parser::links::{extract_municipality_links, MunicipalityRef};
use crate::parser::number::NumericValue;
use crate::parser::votes::{extract_vote_data, VoteData, VoteSummary};
use crate::parser::Layout;

pub const FIXED_COLUMNS: [&str; 5] = [
    "kód obce",
    "název obce",
    "voliči v seznamu",
    "vydané obálky",
    "platné hlasy",
];

/// One output line. Only parties the municipality reported are in `votes`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub code: String,
    pub name: String,
    pub summary: VoteSummary,
    pub votes: HashMap<String, NumericValue>,
}

impl ResultRow {
    /// Render the row against the final party columns; unreported parties are blank.
    pub fn record(&self, parties: &[String]) -> Vec<String> {
        let mut out = Vec::with_capacity(FIXED_COLUMNS.len() + parties.len());
        out.push(self.code.clone());
        out.push(self.name.clone());
        out.push(self.summary.voters.to_string());
        out.push(self.summary.envelopes_issued.to_string());
        out.push(self.summary.valid_votes.to_string());
        out.extend(
            parties
                .iter()
                .map(|p| self.votes.get(p).map(|v| v.to_string()).unwrap_or_default()),
        );
        out
    }
}

/// Run-wide party number -> name mapping. Only grows.
#[derive(Debug, Default)]
pub struct PartySchema {
    parties: BTreeMap<u32, String>,
}

impl PartySchema {
    /// Last write wins when two pages disagree on a party's name.
    pub fn merge(&mut self, names: &BTreeMap<u32, String>) {
        for (&number, name) in names {
            if let Some(previous) = self.parties.insert(number, name.clone()) {
                if previous != *name {
                    warn!(
                        party = number,
                        previous = %previous,
                        current = %name,
                        "Party name changed between pages, keeping the latest"
                    );
                }
            }
        }
    }

    /// Party names ordered by party number.
    pub fn columns(&self) -> Vec<String> {
        self.parties.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }
}

pub struct Report {
    pub parties: Vec<String>,
    pub rows: Vec<ResultRow>,
}

impl Report {
    pub fn header(&self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.parties.iter().cloned())
            .collect()
    }

    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows.iter().map(|row| row.record(&self.parties))
    }
}

/// Accumulates rows and the party schema over one run.
#[derive(Debug, Default)]
pub struct Aggregator {
    schema: PartySchema,
    rows: Vec<ResultRow>,
}

impl Aggregator {
    pub fn absorb(&mut self, municipality: MunicipalityRef, data: VoteData) {
        self.schema.merge(&data.party_names);
        self.rows.push(ResultRow {
            code: municipality.code,
            name: municipality.name,
            summary: data.summary,
            votes: data.party_votes,
        });
    }

    pub fn finish(self) -> Report {
        info!(
            rows = self.rows.len(),
            parties = self.schema.len(),
            "Aggregation finished"
        );
        Report {
            parties: self.schema.columns(),
            rows: self.rows,
        }
    }
}

/// Fetch the listing, then every municipality on it, in listing order.
/// The first failure aborts the whole run.
pub fn run<F: Fetch + ?Sized>(
    fetcher: &F,
    layout: &Layout,
    listing_url: &str,
    progress: &ProgressBar,
) -> Result<Report> {
    let listing = fetcher
        .fetch(listing_url)
        .context("Failed to fetch listing page")?;
    let municipalities = extract_municipality_links(&Html::parse_document(&listing), layout)
        .with_context(|| format!("Failed to read municipalities from {}", listing_url))?;

    info!("Found {} municipalities", municipalities.len());
    progress.set_length(municipalities.len() as u64);

    let mut aggregator = Aggregator::default();
    for municipality in municipalities {
        let data = scrape_municipality(fetcher, layout, &municipality).with_context(|| {
            format!(
                "Municipality {} ({}) at {}",
                municipality.code, municipality.name, municipality.detail_url
            )
        })?;
        // schema conflicts log a warning; keep it off the bar's line
        progress.suspend(|| aggregator.absorb(municipality, data));
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(aggregator.finish())
}

fn scrape_municipality<F: Fetch + ?Sized>(
    fetcher: &F,
    layout: &Layout,
    municipality: &MunicipalityRef,
) -> Result<VoteData> {
    debug!(code = %municipality.code, "Fetching detail page");
    let body = fetcher.fetch(&municipality.detail_url)?;
    let data = extract_vote_data(&Html::parse_document(&body), layout)?;
    Ok(data)
}
