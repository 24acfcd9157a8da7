//! Match listing scraper for oddsportal.com.
//!
//! Pipeline: resolve the listing URL, stabilize the rendered page,
//! locate the per-match nodes, extract fields per node (sequentially or
//! across parallel chunks), aggregate into an [`Extraction`].

pub mod browser;
pub mod dispatcher;
pub mod extractor;
pub mod locator;
pub mod session;
pub mod stabilizer;
pub mod static_dom;

use std::time::Instant;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::ScrapeError;
use crate::resolver;
use crate::sports::{ScoringRules, Sport};
use crate::types::Extraction;

pub use browser::ChromeSession;
pub use session::DomSession;
pub use static_dom::StaticDom;

pub const BASE_URL: &str = "https://www.oddsportal.com";

/// Extraction mode for the located nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One fold over the whole node list. Authoritative.
    Sequential,
    /// Chunked across workers with seeded grouping baselines.
    Parallel,
}

/// Scrape one listing URL end to end with a live browser.
pub async fn scrape_listing(
    url: &str,
    config: &AppConfig,
    mode: Mode,
) -> Result<Extraction, ScrapeError> {
    let (sport, date) = resolver::resolve(url)?;
    let rules = scoring_rules(sport)?;

    let started = Instant::now();
    let session = ChromeSession::launch(&config.session).await?;
    let outcome = run_extraction(&session, url, sport, date, rules, config, mode).await;
    if let Err(e) = session.close().await {
        warn!("failed to close browser session: {e}");
    }

    let extraction = outcome?;
    info!(
        matches = extraction.matches.len(),
        elapsed = ?started.elapsed(),
        "scrape complete"
    );
    Ok(extraction)
}

/// Run the pipeline against a pre-fetched HTML document.
pub async fn scrape_static(
    html: &str,
    sport: Sport,
    date: NaiveDate,
    config: &AppConfig,
    mode: Mode,
) -> Result<Extraction, ScrapeError> {
    let rules = scoring_rules(sport)?;
    let session = StaticDom::parse(html);
    run_extraction(&session, "about:blank", sport, date, rules, config, mode).await
}

/// Stabilize, locate, extract, aggregate. Generic over the session so
/// the same pipeline drives a live browser and a static document.
pub async fn run_extraction<S: DomSession>(
    session: &S,
    url: &str,
    sport: Sport,
    date: NaiveDate,
    rules: ScoringRules,
    config: &AppConfig,
    mode: Mode,
) -> Result<Extraction, ScrapeError> {
    let stabilizer = stabilizer::Stabilizer::from_config(&config.session);
    stabilizer.stabilize(session, url).await?;

    let nodes = locator::locate_match_nodes(session).await?;
    let matches = match mode {
        Mode::Sequential => dispatcher::extract_sequential(session, &nodes, &rules).await?,
        Mode::Parallel => dispatcher::extract_parallel(session, &nodes, &rules).await?,
    };

    Ok(Extraction {
        sport,
        date,
        matches,
    })
}

fn scoring_rules(sport: Sport) -> Result<ScoringRules, ScrapeError> {
    sport
        .scoring()
        .ok_or(ScrapeError::UnsupportedSport(sport.slug()))
}
