pub mod api;
pub mod crawler;

pub use api::ApiServer;
pub use crawler::{CrawlService, CrawlSummary, StopReason};
