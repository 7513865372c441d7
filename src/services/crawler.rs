use crate::config::CrawlSettings;
use crate::domain::{EventStore, MatchCard, Storage};
use crate::error::{HarvestError, Result};
use crate::infrastructure::{
    DocumentFetcher, DocumentParser, MatchCardParser, PlayerStatsParser, StatsOutcome,
};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Why a crawl ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The listing page could not be fetched.
    FetchFailed { page: u32 },
    /// The listing page had no match cards left.
    NoMatchCards { page: u32 },
    /// The configured last page was processed.
    PageCeiling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages_crawled: u32,
    pub new_matches: usize,
    pub known_skipped: usize,
    pub stats_failures: usize,
    pub stop: StopReason,
}

impl CrawlSummary {
    fn new() -> Self {
        Self {
            pages_crawled: 0,
            new_matches: 0,
            known_skipped: 0,
            stats_failures: 0,
            stop: StopReason::PageCeiling,
        }
    }
}

pub struct CrawlService<F> {
    fetcher: F,
    storage: Arc<dyn Storage>,
    settings: CrawlSettings,
    cards: MatchCardParser,
    player_stats: PlayerStatsParser,
}

impl<F: DocumentFetcher> CrawlService<F> {
    pub fn new(fetcher: F, storage: Arc<dyn Storage>, settings: CrawlSettings) -> Result<Self> {
        let cards = MatchCardParser::new(&settings.site_host)?;
        info!("Created new Crawl service for {}", settings.base_url);

        Ok(Self {
            fetcher,
            storage,
            settings,
            cards,
            player_stats: PlayerStatsParser::new()?,
        })
    }

    /// Walk the listing from page 1, filing every unseen match into `store`
    /// and saving the whole store after each page.
    pub async fn run(&self, store: &mut EventStore) -> Result<CrawlSummary> {
        let mut summary = CrawlSummary::new();
        let mut page = 1;

        summary.stop = loop {
            if page > self.settings.max_pages {
                break StopReason::PageCeiling;
            }

            info!("Extracting matches from page {}...", page);
            let url = self.settings.listing_url(page);

            let body = match self.fetcher.fetch(&url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!("No more pages, stopping at {}: {}", url, e);
                    break StopReason::FetchFailed { page };
                }
            };

            let listing = self.cards.parse_str(&body);
            if listing.cards_found == 0 {
                info!("No match cards on page {}, stopping", page);
                break StopReason::NoMatchCards { page };
            }

            let added = self.process_page(page, listing.matches, store, &mut summary).await?;

            self.storage.save_events(store.events())?;
            summary.pages_crawled += 1;
            info!(
                "Page {} saved: {} new matches, {} stored in total",
                page,
                added,
                store.len()
            );

            page += 1;
        };

        Ok(summary)
    }

    async fn process_page(
        &self,
        page: u32,
        cards: Vec<MatchCard>,
        store: &mut EventStore,
        summary: &mut CrawlSummary,
    ) -> Result<usize> {
        // Links are reserved before any detail page is requested so a match
        // listed twice is only fetched once.
        let mut reserved = FxHashSet::default();
        let mut pending = Vec::new();
        for card in cards {
            if store.seen(&card.link) || !reserved.insert(card.link.clone()) {
                summary.known_skipped += 1;
                continue;
            }
            pending.push(card);
        }

        let progress = self.progress_bar(page, pending.len())?;
        let progress = &progress;

        let results: Vec<(MatchCard, StatsOutcome)> = stream::iter(pending)
            .map(move |card| async move {
                let outcome = self.fetch_player_stats(&card.link).await;
                progress.inc(1);
                (card, outcome)
            })
            .buffered(self.settings.concurrency.max(1))
            .collect()
            .await;
        progress.finish_and_clear();

        let mut added = 0;
        for (card, outcome) in results {
            if outcome.is_failed() {
                summary.stats_failures += 1;
            }

            let (event, record) = card.into_record(outcome.into_records());
            if store.insert(event, record) {
                added += 1;
            }
        }

        summary.new_matches += added;
        Ok(added)
    }

    async fn fetch_player_stats(&self, link: &str) -> StatsOutcome {
        let outcome = match self.fetcher.fetch(link).await {
            Ok(body) => StatsOutcome::from(self.player_stats.parse_str(&body)),
            Err(e) => StatsOutcome::Failed(e),
        };

        match &outcome {
            StatsOutcome::Extracted(players) => {
                debug!("Found {} player rows for {}", players.len(), link)
            }
            StatsOutcome::Empty => debug!("No player stats on {}", link),
            StatsOutcome::Failed(e) => warn!("Could not extract player stats for {}: {}", link, e),
        }

        outcome
    }

    fn progress_bar(&self, page: u32, len: usize) -> Result<ProgressBar> {
        if !self.settings.show_progress {
            return Ok(ProgressBar::hidden());
        }

        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .map_err(|e| HarvestError::Other(e.to_string()))?,
        );
        pb.set_message(format!("page {}", page));
        Ok(pb)
    }
}
