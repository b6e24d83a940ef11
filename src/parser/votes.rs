use std::collections::{BTreeMap, HashMap};

use scraper::Html;

use super::number::{parse_number, NumericValue};
use super::{text_of, Layout};
use crate::error::ScrapeError;

/// Zero-based `td` positions inside the summary table.
const VOTERS_CELL: usize = 3;
const ENVELOPES_CELL: usize = 4;
const VALID_VOTES_CELL: usize = 7;

/// Party rows need number, name and vote count.
const PARTY_ROW_CELLS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct VoteSummary {
    pub voters: NumericValue,
    pub envelopes_issued: NumericValue,
    pub valid_votes: NumericValue,
}

/// Everything read from one municipality's detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteData {
    pub summary: VoteSummary,
    /// Party number -> party name.
    pub party_names: BTreeMap<u32, String>,
    /// Party name -> votes in this municipality.
    pub party_votes: HashMap<String, NumericValue>,
}

pub fn extract_vote_data(doc: &Html, layout: &Layout) -> Result<VoteData, ScrapeError> {
    let summary = extract_summary(doc, layout)?;

    let mut party_names = BTreeMap::new();
    let mut party_votes = HashMap::new();

    for block in doc.select(&layout.party_block) {
        for row in layout.data_rows(block) {
            let cells = layout.cells(row);
            if cells.len() < PARTY_ROW_CELLS {
                continue;
            }

            let number_text = text_of(cells[0]);
            let number = parse_number(&number_text)?;
            let name = text_of(cells[1]);
            let votes = parse_number(&text_of(cells[2]))?;

            // blank trailing rows carry "-" in place of numbers
            if number.is_absent() || votes.is_absent() {
                continue;
            }
            let NumericValue::Count(number) = number else {
                return Err(ScrapeError::PartyNumber { text: number_text });
            };
            let number = u32::try_from(number)
                .map_err(|_| ScrapeError::PartyNumber { text: number_text })?;

            party_names.insert(number, name.clone());
            party_votes.insert(name, votes);
        }
    }

    Ok(VoteData {
        summary,
        party_names,
        party_votes,
    })
}

fn extract_summary(doc: &Html, layout: &Layout) -> Result<VoteSummary, ScrapeError> {
    let cells: Vec<_> = doc.select(&layout.summary_cells).collect();
    let cell = |index: usize| -> Result<NumericValue, ScrapeError> {
        let el = cells.get(index).ok_or_else(|| ScrapeError::MissingSummaryCell {
            table: layout.summary_table_id.clone(),
            index,
        })?;
        parse_number(&text_of(*el))
    };

    Ok(VoteSummary {
        voters: cell(VOTERS_CELL)?,
        envelopes_issued: cell(ENVELOPES_CELL)?,
        valid_votes: cell(VALID_VOTES_CELL)?,
    })
}
