use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NOT_AVAILABLE: &str = "N/A";
pub const DRAW: &str = "Draw";

/// One player's row from a match overview table.
///
/// `name` is always written (as `null` when the row had no player link); every
/// other stat only appears when the source cell carried a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: Option<String>,
    #[serde(flatten)]
    pub stats: BTreeMap<String, String>,
}

impl PlayerRecord {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.stats.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.stats.get(field).map(String::as_str)
    }
}

/// A filed match. Card fields missing from an older snapshot read back as
/// `"N/A"`, the same default the listing parser uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub link: String,
    #[serde(default = "not_available")]
    pub time: String,
    #[serde(default = "not_available")]
    pub team_1: String,
    #[serde(default = "not_available")]
    pub team_2: String,
    #[serde(default = "not_available")]
    pub score_1: String,
    #[serde(default = "not_available")]
    pub score_2: String,
    #[serde(default = "not_available")]
    pub status: String,
    #[serde(default = "not_available")]
    pub event_series: String,
    #[serde(default = "not_available")]
    pub winner: String,
    #[serde(default)]
    pub player_stats: Vec<PlayerRecord>,
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// A match as read from a results-listing card, before its detail page has
/// been visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCard {
    pub link: String,
    pub time: String,
    pub team_1: String,
    pub team_2: String,
    pub score_1: String,
    pub score_2: String,
    pub status: String,
    pub event_name: String,
    pub event_series: String,
    pub winner: String,
}

impl MatchCard {
    /// Attach the player stats and split off the event the record is filed under.
    pub fn into_record(self, player_stats: Vec<PlayerRecord>) -> (String, MatchRecord) {
        let record = MatchRecord {
            link: self.link,
            time: self.time,
            team_1: self.team_1,
            team_2: self.team_2,
            score_1: self.score_1,
            score_2: self.score_2,
            status: self.status,
            event_series: self.event_series,
            winner: self.winner,
            player_stats,
        };
        (self.event_name, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_record_serializes_flat_with_null_name() {
        let mut record = PlayerRecord::default();
        record.stats.insert("K".to_string(), "21".to_string());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({ "name": null, "K": "21" }));

        let back: PlayerRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn match_record_defaults_missing_player_stats() {
        let raw = r#"{
            "link": "https://vlr.gg/1/a-vs-b",
            "time": "4:00 PM",
            "team_1": "A",
            "team_2": "B",
            "score_1": "2",
            "score_2": "1",
            "status": "Completed",
            "event_series": "Playoffs",
            "winner": "A"
        }"#;
        let record: MatchRecord = serde_json::from_str(raw).unwrap();
        assert!(record.player_stats.is_empty());
        assert_eq!(record.winner, "A");
    }

    #[test]
    fn match_record_without_card_fields_defaults_to_not_available() {
        let raw = r#"{ "link": "https://vlr.gg/2/tbd", "time": "9:00 PM", "status": "Completed" }"#;
        let record: MatchRecord = serde_json::from_str(raw).unwrap();

        assert_eq!(record.time, "9:00 PM");
        assert_eq!(record.team_1, "N/A");
        assert_eq!(record.team_2, "N/A");
        assert_eq!(record.score_1, "N/A");
        assert_eq!(record.winner, "N/A");
        assert_eq!(record.event_series, "N/A");
    }
}
