mod clients;
mod scrapers;
mod storage;

pub use clients::fetcher::{DocumentFetcher, HttpFetcher};
pub use scrapers::{
    extract_fields, match_cards::MatchCardParser, player_stats::PlayerStatsParser,
    player_stats::StatsOutcome, stripped_text, DocumentParser, FieldLocator, ListingPage,
};
pub use storage::fs_store::FileSystemStore;
