pub mod links;
pub mod number;
pub mod votes;

use std::iter::Skip;

use scraper::element_ref::Select;
use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::ScrapeError;
use crate::settings::Settings;

/// Header rows at the top of every results table.
pub const HEADER_ROWS: usize = 2;

/// Compiled queries describing where data sits on volby.cz pages.
///
/// The site has no stable ids for most tables, so everything here is
/// positional: a class marker for the table, then row and cell indices.
pub struct Layout {
    pub base_url: Url,
    pub summary_table_id: String,
    results_table: Selector,
    summary_cells: Selector,
    party_block: Selector,
    row: Selector,
    cell: Selector,
    link: Selector,
}

impl Layout {
    pub fn new(settings: &Settings) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&settings.base_url).map_err(|source| ScrapeError::Link {
            href: settings.base_url.clone(),
            source,
        })?;
        Ok(Layout {
            base_url,
            summary_table_id: settings.summary_table_id.clone(),
            results_table: selector(&format!("table.{}", settings.listing_table_class))?,
            summary_cells: selector(&format!("#{} td", settings.summary_table_id))?,
            party_block: selector(&format!("div.{}", settings.party_block_class))?,
            row: selector("tr")?,
            cell: selector("td")?,
            link: selector("a")?,
        })
    }

    /// Data rows of a table-like element, header rows skipped.
    fn data_rows<'a, 'b>(&'b self, table: ElementRef<'a>) -> Skip<Select<'a, 'b>> {
        table.select(&self.row).skip(HEADER_ROWS)
    }

    fn cells<'a>(&self, row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        row.select(&self.cell).collect()
    }

    fn href(&self, cell: ElementRef<'_>) -> Option<String> {
        cell.select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string)
    }

    fn resolve(&self, href: &str) -> Result<String, ScrapeError> {
        self.base_url
            .join(href)
            .map(String::from)
            .map_err(|source| ScrapeError::Link {
                href: href.to_string(),
                source,
            })
    }
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// All descendant text of an element, trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Fail loudly when a row is narrower than the positions we read from it.
fn require_cells(cells: &[ElementRef<'_>], expected: usize) -> Result<(), ScrapeError> {
    if cells.len() < expected {
        return Err(ScrapeError::ShortRow {
            expected,
            found: cells.len(),
        });
    }
    Ok(())
}
