use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Directory holding the matches-by-event snapshot
    #[arg(long, global = true, env = "MATCHHARVEST_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Crawl the results listing and merge new matches into the snapshot (default)
    Crawl(CrawlArgs),
    /// Serve the snapshot as JSON
    Serve(ServeArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CrawlArgs {
    /// Site the results listing is read from
    #[arg(long, default_value = "https://www.vlr.gg")]
    pub base_url: String,

    /// Host prefixed onto relative match links
    #[arg(long, default_value = "https://vlr.gg")]
    pub site_host: String,

    /// Last listing page to visit
    #[arg(long, default_value_t = 67)]
    pub max_pages: u32,

    /// Match detail pages fetched at once
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Hide the per-page progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Default for CrawlArgs {
    fn default() -> Self {
        Self {
            base_url: "https://www.vlr.gg".to_string(),
            site_host: "https://vlr.gg".to_string(),
            max_pages: 67,
            concurrency: 1,
            timeout_secs: 30,
            no_progress: false,
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ServeArgs {
    /// Address the read API listens on
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub listen_addr: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_crawl_with_defaults() {
        let args = Args::try_parse_from(["matchharvest"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.data_dir, PathBuf::from("data"));
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn crawl_flags_override_defaults() {
        let args = Args::try_parse_from([
            "matchharvest",
            "crawl",
            "--max-pages",
            "3",
            "--concurrency",
            "4",
            "--no-progress",
            "--data-dir",
            "/tmp/harvest",
        ])
        .unwrap();

        let Some(Command::Crawl(crawl)) = args.command else {
            panic!("expected crawl subcommand");
        };
        assert_eq!(crawl.max_pages, 3);
        assert_eq!(crawl.concurrency, 4);
        assert!(crawl.no_progress);
        assert_eq!(crawl.base_url, CrawlArgs::default().base_url);
        assert_eq!(args.data_dir, PathBuf::from("/tmp/harvest"));
    }

    #[test]
    fn serve_takes_a_listen_address() {
        let args = Args::try_parse_from(["matchharvest", "serve", "--listen-addr", "0.0.0.0:8080"])
            .unwrap();
        match args.command {
            Some(Command::Serve(serve)) => assert_eq!(serve.listen_addr, "0.0.0.0:8080"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
