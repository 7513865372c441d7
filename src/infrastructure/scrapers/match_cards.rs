use super::{extract_fields, stripped_text, DocumentParser, FieldLocator};
use crate::domain::{MatchCard, DRAW, NOT_AVAILABLE};
use crate::error::{HarvestError, Result};
use scraper::{ElementRef, Html, Selector};
use std::cmp::Ordering;
use std::collections::HashMap;

const TIME: &str = "time";
const STATUS: &str = "status";

/// The match cards found on one results-listing page.
#[derive(Debug, Default)]
pub struct ListingPage {
    /// Number of card containers on the page, matches or not. Zero means the
    /// listing has run out.
    pub cards_found: usize,
    pub matches: Vec<MatchCard>,
}

pub struct MatchCardParser {
    site_host: String,
    card: Selector,
    link: Selector,
    details: Vec<FieldLocator>,
    team: FieldLocator,
    team_name: FieldLocator,
    score: FieldLocator,
    event: FieldLocator,
    event_series: FieldLocator,
}

impl MatchCardParser {
    /// `site_host` is prefixed onto every card's relative href.
    pub fn new(site_host: &str) -> Result<Self> {
        let parse = |css: &str| Selector::parse(css).map_err(|e| HarvestError::Selector(e.to_string()));

        Ok(Self {
            site_host: site_host.trim_end_matches('/').to_string(),
            card: parse("div.wf-card")?,
            link: parse("a[href]")?,
            details: vec![
                FieldLocator::new(TIME, "div.match-item-time")?,
                FieldLocator::new(STATUS, "div.ml-status")?,
            ],
            team: FieldLocator::new("team", "div.match-item-vs-team")?,
            team_name: FieldLocator::new("team_name", "div.match-item-vs-team-name")?,
            score: FieldLocator::new("score", "div.match-item-vs-team-score")?,
            event: FieldLocator::new("event", "div.match-item-event")?,
            event_series: FieldLocator::new("event_series", "div.match-item-event-series")?,
        })
    }

    fn parse_card(&self, anchor: ElementRef, href: &str) -> MatchCard {
        let details = extract_fields(anchor, &self.details);

        let (team_1, team_2) = match self.team.locate_all(anchor).as_slice() {
            [first, second] => (
                self.team_name.locate(*first).unwrap_or_else(not_available),
                self.team_name.locate(*second).unwrap_or_else(not_available),
            ),
            _ => (not_available(), not_available()),
        };

        let scores = match self.score.locate_all(anchor).as_slice() {
            [first, second] => Some((stripped_text(*first), stripped_text(*second))),
            _ => None,
        };

        let (event_name, event_series) = self.event_names(anchor);

        let (score_1, score_2, winner) = match scores {
            Some((score_1, score_2)) => {
                let winner = decide_winner(&team_1, &team_2, &score_1, &score_2);
                (score_1, score_2, winner)
            }
            None => (not_available(), not_available(), not_available()),
        };

        MatchCard {
            link: format!("{}{}", self.site_host, href),
            time: field_or_default(&details, TIME),
            team_1,
            team_2,
            score_1,
            score_2,
            status: field_or_default(&details, STATUS),
            event_name,
            event_series,
            winner,
        }
    }

    /// The event block holds the event name with the series label nested
    /// inside it; the series text is cut out of the name.
    fn event_names(&self, anchor: ElementRef) -> (String, String) {
        let Some(event) = self.event.locate_all(anchor).into_iter().next() else {
            return (not_available(), not_available());
        };

        let mut name = stripped_text(event);
        match self.event_series.locate(event) {
            Some(series) => {
                if !series.is_empty() {
                    name = name.replace(&series, "").trim().to_string();
                }
                (name, series)
            }
            None => (name, not_available()),
        }
    }
}

impl DocumentParser for MatchCardParser {
    type Output = ListingPage;

    fn parse(&self, document: &Html) -> ListingPage {
        let mut page = ListingPage::default();

        for card in document.select(&self.card) {
            page.cards_found += 1;

            for anchor in card.select(&self.link) {
                if let Some(href) = anchor.value().attr("href") {
                    page.matches.push(self.parse_card(anchor, href));
                }
            }
        }

        page
    }
}

/// Higher score wins, equal scores are a draw. Scores that are both whole
/// numbers compare numerically so that "10" beats "2"; anything else falls
/// back to plain string order.
pub fn decide_winner(team_1: &str, team_2: &str, score_1: &str, score_2: &str) -> String {
    match compare_scores(score_1, score_2) {
        Ordering::Greater => team_1.to_string(),
        Ordering::Less => team_2.to_string(),
        Ordering::Equal => DRAW.to_string(),
    }
}

fn compare_scores(score_1: &str, score_2: &str) -> Ordering {
    match (score_1.parse::<u64>(), score_2.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => score_1.cmp(score_2),
    }
}

fn field_or_default(fields: &HashMap<&'static str, String>, field: &str) -> String {
    fields.get(field).cloned().unwrap_or_else(not_available)
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
        <html><body>
        <div class="wf-label mod-large">Sat, March 23, 2024</div>
        <div class="wf-card">
            <a href="/313456/sentinels-vs-gen-g-masters-madrid-gf" class="wf-module-item match-item">
                <div class="match-item-time"> 6:00 PM </div>
                <div class="match-item-vs">
                    <div class="match-item-vs-team">
                        <div class="match-item-vs-team-name"><div class="text-of">Sentinels</div></div>
                        <div class="match-item-vs-team-score">3</div>
                    </div>
                    <div class="match-item-vs-team">
                        <div class="match-item-vs-team-name"><div class="text-of">Gen.G</div></div>
                        <div class="match-item-vs-team-score">2</div>
                    </div>
                </div>
                <div class="match-item-eta"><div class="ml mod-completed"><div class="ml-status">Completed</div></div></div>
                <div class="match-item-event text-of">
                    <div class="match-item-event-series text-of">Playoffs: Grand Final</div>
                    Champions Tour 2024: Masters Madrid
                </div>
            </a>
            <a href="/313455/gen-g-vs-sentinels-masters-madrid-ubf" class="wf-module-item match-item">
                <div class="match-item-time">3:00 PM</div>
                <div class="match-item-vs">
                    <div class="match-item-vs-team">
                        <div class="match-item-vs-team-name">Gen.G</div>
                        <div class="match-item-vs-team-score">1</div>
                    </div>
                    <div class="match-item-vs-team">
                        <div class="match-item-vs-team-name">Sentinels</div>
                        <div class="match-item-vs-team-score">1</div>
                    </div>
                </div>
                <div class="ml-status">Completed</div>
                <div class="match-item-event">Champions Tour 2024: Masters Madrid</div>
            </a>
        </div>
        <div class="wf-card">
            <a href="/300001/tbd-vs-tbd">
                <div class="match-item-vs">
                    <div class="match-item-vs-team"><div class="match-item-vs-team-name">TBD</div></div>
                    <div class="match-item-vs-team"><div class="match-item-vs-team-name">TBD</div></div>
                </div>
            </a>
        </div>
        </body></html>
    "#;

    fn parser() -> MatchCardParser {
        MatchCardParser::new("https://vlr.gg").unwrap()
    }

    #[test]
    fn parses_every_card_on_the_page() {
        let page = parser().parse_str(RESULTS_PAGE);
        assert_eq!(page.cards_found, 2);
        assert_eq!(page.matches.len(), 3);

        let grand_final = &page.matches[0];
        assert_eq!(
            grand_final.link,
            "https://vlr.gg/313456/sentinels-vs-gen-g-masters-madrid-gf"
        );
        assert_eq!(grand_final.time, "6:00 PM");
        assert_eq!(grand_final.team_1, "Sentinels");
        assert_eq!(grand_final.team_2, "Gen.G");
        assert_eq!(grand_final.score_1, "3");
        assert_eq!(grand_final.score_2, "2");
        assert_eq!(grand_final.status, "Completed");
        assert_eq!(grand_final.winner, "Sentinels");
    }

    #[test]
    fn series_is_stripped_from_event_name() {
        let page = parser().parse_str(RESULTS_PAGE);

        assert_eq!(page.matches[0].event_name, "Champions Tour 2024: Masters Madrid");
        assert_eq!(page.matches[0].event_series, "Playoffs: Grand Final");

        assert_eq!(page.matches[1].event_name, "Champions Tour 2024: Masters Madrid");
        assert_eq!(page.matches[1].event_series, "N/A");
    }

    #[test]
    fn equal_scores_are_a_draw() {
        let page = parser().parse_str(RESULTS_PAGE);
        assert_eq!(page.matches[1].winner, "Draw");
    }

    #[test]
    fn missing_blocks_fall_back_to_not_available() {
        let page = parser().parse_str(RESULTS_PAGE);
        let pending = &page.matches[2];

        assert_eq!(pending.time, "N/A");
        assert_eq!(pending.status, "N/A");
        assert_eq!(pending.team_1, "TBD");
        assert_eq!(pending.score_1, "N/A");
        assert_eq!(pending.score_2, "N/A");
        assert_eq!(pending.winner, "N/A");
        assert_eq!(pending.event_name, "N/A");
        assert_eq!(pending.event_series, "N/A");
    }

    #[test]
    fn page_without_cards_is_empty() {
        let page = parser()
            .parse_str("<html><body><div class=\"wf-label\">No results</div></body></html>");
        assert_eq!(page.cards_found, 0);
        assert!(page.matches.is_empty());
    }

    #[test]
    fn host_trailing_slash_is_not_doubled() {
        let page = MatchCardParser::new("https://vlr.gg/")
            .unwrap()
            .parse_str(RESULTS_PAGE);
        assert!(page.matches[0].link.starts_with("https://vlr.gg/313456/"));
    }

    #[test]
    fn winner_follows_the_higher_score() {
        assert_eq!(decide_winner("A", "B", "2", "0"), "A");
        assert_eq!(decide_winner("A", "B", "0", "2"), "B");
        assert_eq!(decide_winner("A", "B", "1", "1"), "Draw");
    }

    #[test]
    fn multi_digit_scores_compare_numerically() {
        assert_eq!(decide_winner("A", "B", "13", "9"), "A");
        assert_eq!(decide_winner("A", "B", "2", "10"), "B");
    }

    #[test]
    fn non_numeric_scores_compare_as_text() {
        assert_eq!(decide_winner("A", "B", "–", "–"), "Draw");
        assert_eq!(decide_winner("A", "B", "b", "a"), "A");
    }
}
