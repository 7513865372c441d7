use crate::config::cli::{Args, CrawlArgs};
use crate::error::Result;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod cli;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// What the crawler needs to know about the listing it walks.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub base_url: String,
    pub site_host: String,
    pub max_pages: u32,
    pub concurrency: usize,
    pub show_progress: bool,
}

impl CrawlSettings {
    pub fn listing_url(&self, page: u32) -> String {
        format!(
            "{}/matches/results/?page={}",
            self.base_url.trim_end_matches('/'),
            page
        )
    }
}

impl From<&CrawlArgs> for CrawlSettings {
    fn from(args: &CrawlArgs) -> Self {
        Self {
            base_url: args.base_url.clone(),
            site_host: args.site_host.clone(),
            max_pages: args.max_pages,
            concurrency: args.concurrency.max(1),
            show_progress: !args.no_progress,
        }
    }
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self::from(&CrawlArgs::default())
    }
}

pub struct Config {
    pub args: Args,
    pub http_client: Client,
}

impl Config {
    pub fn new(args: Args) -> Result<Self> {
        let timeout_secs = match &args.command {
            Some(cli::Command::Crawl(crawl)) => crawl.timeout_secs,
            _ => CrawlArgs::default().timeout_secs,
        };

        let http_client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { args, http_client })
    }

    pub fn data_dir(&self) -> &Path {
        &self.args.data_dir
    }

    pub fn ensure_directories(&self) -> Result<()> {
        if !self.args.data_dir.exists() {
            std::fs::create_dir_all(&self.args.data_dir)?;
        }

        info!("Data dir {} exists", self.args.data_dir.display());
        Ok(())
    }
}
