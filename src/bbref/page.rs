//! Decoding of Shot Finder result pages: the shots table, the pagination
//! link and the page header.

use scraper::{Html, Selector};
use url::Url;

use crate::pbp::{PageDecoder, RawTableRow, ScrapeError};

/// The Shot Finder table carries 11 columns; these are the ones the
/// pipeline consumes.
const EXPECTED_CELLS: usize = 11;
const HOME_AWAY_CELL: usize = 4;
const QUARTER_CELL: usize = 7;
const TIME_CELL: usize = 8;
const RESULT_CELL: usize = 9;
const DESCRIPTION_CELL: usize = 10;

/// [`PageDecoder`] for Shot Finder result pages.
pub struct ShotFinderPage {
    base_url: Url,
}

impl ShotFinderPage {
    pub fn new(base_url: Url) -> Self {
        ShotFinderPage { base_url }
    }

    /// Player name from the page header (`div#pi h1`), first two words.
    pub fn player_header(page: &str) -> Option<String> {
        let doc = Html::parse_document(page);
        let h1_sel = Selector::parse("div#pi h1").unwrap();
        let text = doc.select(&h1_sel).next()?.text().collect::<String>();
        let words: Vec<&str> = text.split_whitespace().take(2).collect();
        if words.is_empty() {
            None
        } else {
            Some(words.join(" "))
        }
    }
}

/// Human-readable season scope for a year ID (`"2020"` -> the 2019/2020
/// season; anything non-numeric means the whole career).
pub fn season_label(year_id: &str) -> String {
    match year_id.parse::<i32>() {
        Ok(year) => format!("the {}/{} season", year - 1, year),
        Err(_) => "all seasons".to_string(),
    }
}

impl PageDecoder for ShotFinderPage {
    fn rows(&self, page: &str) -> Result<Vec<RawTableRow>, ScrapeError> {
        let doc = Html::parse_document(page);
        let table_sel = Selector::parse("table").unwrap();
        let tr_sel = Selector::parse("tr").unwrap();
        let td_sel = Selector::parse("td").unwrap();

        let table = doc
            .select(&table_sel)
            .next()
            .ok_or_else(|| ScrapeError::MalformedRow {
                reason: "no shots table in page".to_string(),
            })?;

        let mut rows = Vec::new();
        for tr in table.select(&tr_sel) {
            let cells: Vec<String> = tr
                .select(&td_sel)
                .map(|td| td.text().collect::<String>().trim().to_string())
                .collect();
            // Header rows are <th>-only and decode to zero cells.
            if cells.is_empty() {
                continue;
            }
            if cells.len() < EXPECTED_CELLS {
                return Err(ScrapeError::MalformedRow {
                    reason: format!("expected {EXPECTED_CELLS} cells, got {}", cells.len()),
                });
            }
            rows.push(RawTableRow {
                home_away: cells[HOME_AWAY_CELL].clone(),
                quarter: cells[QUARTER_CELL].clone(),
                time: cells[TIME_CELL].clone(),
                result: cells[RESULT_CELL].clone(),
                description: cells[DESCRIPTION_CELL].clone(),
            });
        }
        Ok(rows)
    }

    fn next_page(&self, page: &str) -> Option<Url> {
        let doc = Html::parse_document(page);
        let a_sel = Selector::parse("a").unwrap();
        let href = doc
            .select(&a_sel)
            .find(|a| a.text().collect::<String>().trim() == "Next page")?
            .value()
            .attr("href")?;
        self.base_url.join(href).ok()
    }
}
