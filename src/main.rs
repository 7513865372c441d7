use clap::Parser;
use matchharvest::config::cli::{Args, Command, CrawlArgs};
use matchharvest::config::{Config, CrawlSettings};
use matchharvest::domain::{EventStore, Storage};
use matchharvest::error::Result;
use matchharvest::infrastructure::{FileSystemStore, HttpFetcher};
use matchharvest::services::{ApiServer, CrawlService};
use std::sync::Arc;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let level = args.log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = Config::new(args)?;
    config.ensure_directories()?;

    let storage: Arc<dyn Storage> = Arc::new(FileSystemStore::new(config.data_dir()));

    let command = config
        .args
        .command
        .clone()
        .unwrap_or_else(|| Command::Crawl(CrawlArgs::default()));

    match command {
        Command::Crawl(crawl) => {
            let mut store = EventStore::load(storage.as_ref());
            let crawler = CrawlService::new(
                HttpFetcher::new(config.http_client.clone()),
                storage,
                CrawlSettings::from(&crawl),
            )?;

            let summary = crawler.run(&mut store).await?;
            info!(
                "Crawl finished ({:?}): {} pages, {} new matches, {} already known, {} without player stats",
                summary.stop,
                summary.pages_crawled,
                summary.new_matches,
                summary.known_skipped,
                summary.stats_failures
            );
            info!(
                "{} matches across {} events saved",
                store.len(),
                store.event_count()
            );
        }
        Command::Serve(serve) => {
            ApiServer::new(serve.listen_addr, storage).run().await?;
        }
    }

    Ok(())
}
