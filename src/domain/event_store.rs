use super::storage::Storage;
use super::MatchRecord;
use rustc_hash::FxHashSet;
use std::collections::{BTreeMap, VecDeque};
use tracing::{info, warn};

/// Event name to its matches, newest first.
pub type EventMap = BTreeMap<String, VecDeque<MatchRecord>>;

/// In-memory accumulation of crawled matches grouped by event.
///
/// Every link ever filed is tracked in a seen-set so a match is never fetched
/// or stored twice. Records are only ever added, never removed or moved
/// between events.
#[derive(Debug, Default)]
pub struct EventStore {
    events: EventMap,
    seen: FxHashSet<String>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: EventMap) -> Self {
        let seen = events
            .values()
            .flatten()
            .map(|record| record.link.clone())
            .collect();
        Self { events, seen }
    }

    /// Seed the store from the persisted snapshot. A missing or unreadable
    /// snapshot yields an empty store.
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.load_events() {
            Ok(Some(events)) => {
                let store = Self::from_events(events);
                info!(
                    "Loaded {} matches across {} events",
                    store.len(),
                    store.event_count()
                );
                store
            }
            Ok(None) => {
                info!("No snapshot found, starting with an empty store");
                Self::new()
            }
            Err(e) => {
                warn!("Could not read snapshot, starting with an empty store: {}", e);
                Self::new()
            }
        }
    }

    pub fn seen(&self, link: &str) -> bool {
        self.seen.contains(link)
    }

    /// File `record` at the front of `event`'s list.
    ///
    /// Returns `false` and leaves the store untouched when the link is
    /// already known.
    pub fn insert(&mut self, event: impl Into<String>, record: MatchRecord) -> bool {
        if !self.seen.insert(record.link.clone()) {
            return false;
        }
        self.events.entry(event.into()).or_default().push_front(record);
        true
    }

    pub fn events(&self) -> &EventMap {
        &self.events
    }

    pub fn matches(&self, event: &str) -> Option<&VecDeque<MatchRecord>> {
        self.events.get(event)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}
