use super::{stripped_text, DocumentParser, FieldLocator};
use crate::domain::PlayerRecord;
use crate::error::{HarvestError, Result};
use scraper::{Html, Selector};

/// One overview table per team; anything after the second is ignored.
pub const MAX_STAT_TABLES: usize = 2;

const PLUS_MINUS_EN_DASH: &str = "+/\u{2013}";
const PLUS_MINUS: &str = "+/-";

/// What a match detail page yielded for its players.
#[derive(Debug)]
pub enum StatsOutcome {
    Extracted(Vec<PlayerRecord>),
    /// The page was read but carried no player rows.
    Empty,
    /// The page could not be fetched.
    Failed(HarvestError),
}

impl StatsOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, StatsOutcome::Failed(_))
    }

    pub fn into_records(self) -> Vec<PlayerRecord> {
        match self {
            StatsOutcome::Extracted(records) => records,
            StatsOutcome::Empty | StatsOutcome::Failed(_) => Vec::new(),
        }
    }
}

impl From<Vec<PlayerRecord>> for StatsOutcome {
    fn from(records: Vec<PlayerRecord>) -> Self {
        if records.is_empty() {
            StatsOutcome::Empty
        } else {
            StatsOutcome::Extracted(records)
        }
    }
}

pub struct PlayerStatsParser {
    table: Selector,
    header_cells: Selector,
    body_rows: Selector,
    row_cells: Selector,
    name: FieldLocator,
    side: FieldLocator,
}

impl PlayerStatsParser {
    pub fn new() -> Result<Self> {
        let parse = |css: &str| Selector::parse(css).map_err(|e| HarvestError::Selector(e.to_string()));

        Ok(Self {
            table: parse("table.wf-table-inset.mod-overview")?,
            header_cells: parse("thead th")?,
            body_rows: parse("tbody tr")?,
            row_cells: parse("td")?,
            name: FieldLocator::new("name", "a")?,
            // Each stat cell renders the overall value first, then the
            // attack/defense splits.
            side: FieldLocator::new("side", "span.side")?,
        })
    }
}

impl DocumentParser for PlayerStatsParser {
    type Output = Vec<PlayerRecord>;

    fn parse(&self, document: &Html) -> Vec<PlayerRecord> {
        let mut players = Vec::new();

        for table in document.select(&self.table).take(MAX_STAT_TABLES) {
            let headers: Vec<String> = table
                .select(&self.header_cells)
                .map(|th| normalize_header(stripped_text(th)))
                .collect();

            for row in table.select(&self.body_rows) {
                let cells: Vec<_> = row.select(&self.row_cells).collect();
                let Some(first) = cells.first() else {
                    continue;
                };

                let mut player = PlayerRecord {
                    name: self.name.locate(*first),
                    ..Default::default()
                };

                for (header, cell) in headers.iter().zip(cells.iter()).skip(1) {
                    if let Some(value) = self.side.locate(*cell).filter(|v| !v.is_empty()) {
                        player.stats.insert(header.clone(), value);
                    }
                }

                if !player.is_empty() {
                    players.push(player);
                }
            }
        }

        players
    }
}

fn normalize_header(header: String) -> String {
    if header == PLUS_MINUS_EN_DASH {
        PLUS_MINUS.to_string()
    } else {
        header
    }
}
