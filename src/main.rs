//! Command-line entry point.
//!
//! # Usage
//!
//! ```bash
//! # Print the combined checkout link for every free offer
//! free-offers checkout
//!
//! # Write the promotion feed
//! free-offers feed --output epicFreeGames.xml --max-items 30
//!
//! # Write the trailing-window archive feed
//! free-offers archive --window-days 30
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use free_offers::application::services::archive_feed::ArchiveFeedBuilder;
use free_offers::application::services::feed_service::{archive_channel, catalog_channel};
use free_offers::application::services::{
    CheckoutLink, CheckoutUrlBuilder, EntryBuilder, FeedGrouper, FeedService, OfferCollector,
    OfferSource, PayloadKind,
};
use free_offers::config::{self, Config};
use free_offers::infrastructure::http::{HttpFetcher, build_client};
use free_offers::infrastructure::render::RssRenderer;

/// Finds free storefront offers and publishes them as a checkout link or feed.
#[derive(Parser)]
#[command(name = "free-offers")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one checkout link covering every currently free offer
    Checkout,

    /// Write the promotion feed grouped by start date
    Feed {
        /// Output file (defaults to FEED_OUTPUT_PATH)
        #[arg(short, long)]
        output: Option<String>,

        /// Maximum number of feed entries (defaults to FEED_MAX_ITEMS)
        #[arg(short, long)]
        max_items: Option<usize>,
    },

    /// Write the archive feed for the trailing window
    Archive {
        /// Output file (defaults to ARCHIVE_OUTPUT_PATH)
        #[arg(short, long)]
        output: Option<String>,

        /// Window size in days (defaults to ARCHIVE_WINDOW_DAYS)
        #[arg(short, long)]
        window_days: Option<u32>,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config);
    config.print_summary();

    match cli.command {
        Commands::Checkout => run_checkout(&config).await?,
        Commands::Feed { output, max_items } => run_feed(&config, output, max_items).await?,
        Commands::Archive {
            output,
            window_days,
        } => run_archive(&config, output, window_days).await?,
    }

    Ok(())
}

/// Collects offers from every source and prints the combined link.
///
/// Source failures are reported but never fail the command; an empty result
/// prints a notice instead of a link.
async fn run_checkout(config: &Config) -> Result<()> {
    let client = build_client(config.http_timeout())?;

    let mut sources: Vec<OfferSource> = config
        .discover_platforms
        .iter()
        .map(|platform| {
            OfferSource::new(
                format!("discover:{platform}"),
                PayloadKind::Discover,
                Arc::new(HttpFetcher::discover(client.clone(), config, platform)),
            )
        })
        .collect();
    sources.push(OfferSource::new(
        "catalog",
        PayloadKind::Catalog,
        Arc::new(HttpFetcher::catalog(client, config)),
    ));

    let report = OfferCollector::new(sources).collect().await;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(count) => println!(
                "{} {} ({} offers)",
                "✓".green(),
                outcome.source.bold(),
                count
            ),
            Err(e) => println!("{} {}: {}", "✗".red(), outcome.source.bold(), e),
        }
    }
    println!();

    match CheckoutUrlBuilder::new(config.storefront()).build(&report.offers) {
        CheckoutLink::Url(url) => {
            println!(
                "{}",
                format!("Combined checkout URL ({} offers):", report.offers.len())
                    .bright_blue()
                    .bold()
            );
            println!("{url}");
        }
        CheckoutLink::NoOffers => {
            println!("{}", "No completely free offers found.".yellow());
        }
    }

    Ok(())
}

async fn run_feed(config: &Config, output: Option<String>, max_items: Option<usize>) -> Result<()> {
    let storefront = config.storefront();
    let client = build_client(config.http_timeout())?;
    let path = output.unwrap_or_else(|| config.feed_output_path.clone());
    let max_items = max_items.unwrap_or(config.feed_max_items).max(1);

    let service = FeedService::new(
        Arc::new(HttpFetcher::catalog(client, config)),
        Arc::new(RssRenderer::new()),
        EntryBuilder::Catalog(FeedGrouper::new(storefront.clone(), max_items)),
        catalog_channel(&storefront, &config.feed_title),
    );

    let document = service
        .publish(&path)
        .await
        .context("Failed to generate promotion feed")?;

    println!(
        "{} {} ({} items)",
        "RSS generated:".green(),
        path,
        document.entries
    );

    Ok(())
}

async fn run_archive(
    config: &Config,
    output: Option<String>,
    window_days: Option<u32>,
) -> Result<()> {
    let storefront = config.storefront();
    let client = build_client(config.http_timeout())?;
    let path = output.unwrap_or_else(|| config.archive_output_path.clone());
    let window_days = window_days.unwrap_or(config.archive_window_days).max(1);

    let service = FeedService::new(
        Arc::new(HttpFetcher::archive(client, config)),
        Arc::new(RssRenderer::new()),
        EntryBuilder::Archive(ArchiveFeedBuilder::new(window_days)),
        archive_channel(&storefront, &config.feed_title, window_days),
    );

    let document = service
        .publish(&path)
        .await
        .context("Failed to generate archive feed")?;

    println!(
        "{} {} ({} items)",
        "RSS generated:".green(),
        path,
        document.entries
    );

    Ok(())
}
