use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use matchscan::cli::Cli;
use matchscan::config::AppConfig;
use matchscan::error::ScrapeError;
use matchscan::render;
use matchscan::resolver;
use matchscan::retry::{self, RetryConfig};
use matchscan::scraper::{self, Mode};
use matchscan::sports::Sport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "matchscan=debug"
    } else {
        "matchscan=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load()?;
    let mode = if cli.parallel {
        Mode::Parallel
    } else {
        Mode::Sequential
    };

    let extraction = if let Some(path) = &cli.from_file {
        let html = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let sport = cli.sport.context("--sport is required with --from-file")?;
        let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
        scraper::scrape_static(&html, sport, date, &config, mode).await?
    } else {
        let url = match cli.url {
            Some(url) => url,
            None => resolver::listing_url(
                cli.sport.unwrap_or(Sport::Football),
                cli.date.unwrap_or_else(|| Local::now().date_naive()),
            ),
        };
        let retry_config = RetryConfig::from(&config.retry);
        retry::retry_if(
            &retry_config,
            "scrape listing",
            || scraper::scrape_listing(&url, &config, mode),
            ScrapeError::is_retryable,
        )
        .await?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
    } else {
        print!("{}", render::render(&extraction));
    }

    Ok(())
}
