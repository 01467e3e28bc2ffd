// src/bin/cli.rs

//! Page Mirror CLI
//!
//! Local execution entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use page_mirror::{
    error::Result,
    models::Config,
    pipeline,
    services::{HttpPageSource, PageCrawler},
    storage::LocalStorage,
    utils::parse_seeds,
};

/// page-mirror - Remote Page Cache
#[derive(Parser, Debug)]
#[command(
    name = "page-mirror",
    version,
    about = "Mirror a graph of remote document pages into a local cache"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "page-mirror.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl pages reachable from the seeds, cache first
    Crawl {
        /// Ignore cached entries and download everything
        #[arg(long)]
        no_cache: bool,

        /// Seed page ids (default: `seeds` from config)
        seeds: Vec<String>,
    },

    /// Wipe the cache and download every reachable page again
    Redownload {
        /// Seed page ids (default: `seeds` from config)
        seeds: Vec<String>,
    },

    /// Re-download a single page and overwrite its cache entry
    Refresh {
        /// Page id
        id: String,
    },

    /// Remove a single page from the cache
    Invalidate {
        /// Page id
        id: String,
    },

    /// Validate configuration file
    Validate,

    /// Show cache location and contents
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn build_crawler(config: &Config, storage: &LocalStorage) -> Result<PageCrawler> {
    let source = HttpPageSource::from_config(&config.remote)?;
    Ok(PageCrawler::from_config(
        config,
        Arc::new(source),
        Arc::new(storage.clone()),
    ))
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    let storage = LocalStorage::from_config(&config.cache);

    let result = match cli.command {
        Command::Crawl { no_cache, seeds } => {
            let seeds = if seeds.is_empty() { config.seeds.clone() } else { seeds };
            let use_cache = config.cache.enabled && !no_cache;
            let crawler = build_crawler(&config, &storage)?;
            pipeline::run_crawl(&crawler, &parse_seeds(&seeds), use_cache)
                .await
                .map(|_| ())
        }

        Command::Redownload { seeds } => {
            let seeds = if seeds.is_empty() { config.seeds.clone() } else { seeds };
            let crawler = build_crawler(&config, &storage)?;
            pipeline::run_redownload(&crawler, &parse_seeds(&seeds))
                .await
                .map(|_| ())
        }

        Command::Refresh { id } => {
            let crawler = build_crawler(&config, &storage)?;
            pipeline::run_refresh(&crawler, &id).await.map(|_| ())
        }

        Command::Invalidate { id } => {
            let crawler = build_crawler(&config, &storage)?;
            pipeline::run_invalidate(&crawler, &id).await
        }

        Command::Validate => pipeline::run_validate(&config),

        Command::Info => pipeline::run_info(&storage).await.map(|_| ()),
    };

    if let Err(e) = &result {
        log::error!("{}", e);
    }
    result
}
