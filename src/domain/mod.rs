mod event_store;
mod match_record;
pub(crate) mod storage;

pub use event_store::{EventMap, EventStore};
pub use match_record::{MatchCard, MatchRecord, PlayerRecord, DRAW, NOT_AVAILABLE};
pub use storage::{Storage, StorageKeys};
