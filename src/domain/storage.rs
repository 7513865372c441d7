use super::EventMap;
use crate::error::Result;

pub trait Storage: Send + Sync {
    /// `Ok(None)` when no snapshot has been written yet.
    fn load_events(&self) -> Result<Option<EventMap>>;
    fn save_events(&self, events: &EventMap) -> Result<()>;
}

pub struct StorageKeys;

impl StorageKeys {
    pub const MATCHES_BY_EVENT: &'static str = "matches_by_event";
}
