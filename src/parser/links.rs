use scraper::Html;

use super::{require_cells, text_of, Layout};
use crate::error::ScrapeError;

/// One municipality from the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityRef {
    pub code: String,
    pub name: String,
    pub detail_url: String,
}

/// Collect municipality links from every results table on a listing page.
///
/// Rows whose first cell carries no link (totals, padding rows) are not
/// municipalities and are skipped. Document order is kept.
pub fn extract_municipality_links(
    doc: &Html,
    layout: &Layout,
) -> Result<Vec<MunicipalityRef>, ScrapeError> {
    let mut refs = Vec::new();

    for table in doc.select(&layout.results_table) {
        for row in layout.data_rows(table) {
            let cells = layout.cells(row);
            if cells.is_empty() {
                continue;
            }
            require_cells(&cells, 2)?;

            let Some(href) = layout.href(cells[0]) else {
                continue;
            };
            refs.push(MunicipalityRef {
                code: text_of(cells[0]),
                name: text_of(cells[1]),
                detail_url: layout.resolve(&href)?,
            });
        }
    }

    Ok(refs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use pretty_assertions::assert_eq;

    fn parse(fixture: &str) -> Vec<MunicipalityRef> {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", fixture)).unwrap();
        let layout = Layout::new(&Settings::default()).unwrap();
        extract_municipality_links(&Html::parse_document(&html), &layout).unwrap()
    }

    #[test]
    fn benesov_listing() {
        let refs = parse("listing_benesov");
        // 5 linked rows across three column tables; the "-" padding row has no link
        assert_eq!(refs.len(), 5);
        let codes: Vec<&str> = refs.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["529303", "532568", "530743", "532380", "529451"]);
        assert_eq!(refs[0].name, "Benešov");
        assert_eq!(
            refs[0].detail_url,
            "https://www.volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xkraj=2&xobec=529303&xvyber=2101"
        );
    }

    #[test]
    fn names_are_trimmed() {
        let refs = parse("listing_benesov");
        assert!(refs.iter().all(|r| r.name == r.name.trim() && !r.name.is_empty()));
        assert_eq!(refs[4].name, "Bystřice");
    }

    #[test]
    fn rows_without_link_are_skipped() {
        let html = r#"<table class="table">
            <tr><th>Obec</th><th>Název</th></tr>
            <tr><th>číslo</th><th>název</th></tr>
            <tr><td><a href="ps311?xobec=1">1</a></td><td>Jedna</td></tr>
            <tr><td>2</td><td>Bez odkazu</td></tr>
            <tr></tr>
        </table>"#;
        let layout = Layout::new(&Settings::default()).unwrap();
        let refs = extract_municipality_links(&Html::parse_document(html), &layout).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].code, "1");
    }

    #[test]
    fn header_rows_are_never_data() {
        let html = r#"<table class="table">
            <tr><td><a href="ps311?xobec=9">9</a></td><td>Hlavička</td></tr>
            <tr><td><a href="ps311?xobec=8">8</a></td><td>Hlavička</td></tr>
        </table>"#;
        let layout = Layout::new(&Settings::default()).unwrap();
        let refs = extract_municipality_links(&Html::parse_document(html), &layout).unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn single_cell_row_is_fatal() {
        let html = r#"<table class="table">
            <tr><th>a</th></tr><tr><th>b</th></tr>
            <tr><td><a href="ps311?xobec=1">1</a></td></tr>
        </table>"#;
        let layout = Layout::new(&Settings::default()).unwrap();
        let err = extract_municipality_links(&Html::parse_document(html), &layout).unwrap_err();
        assert!(matches!(err, ScrapeError::ShortRow { expected: 2, found: 1 }));
    }
}
