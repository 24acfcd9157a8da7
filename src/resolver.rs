//! Listing URL <-> (sport, date) resolution. Pure functions, no I/O.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ScrapeError;
use crate::scraper::BASE_URL;
use crate::sports::Sport;

/// Trailing `/{sport-slug}[/{yyyymmdd}]` of a listing URL.
static LISTING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/(?P<sport>[a-z0-9-]+)(?:/(?P<date>\d{8}))?/?$").unwrap()
});

/// Build the listing URL for a sport and date.
pub fn listing_url(sport: Sport, date: NaiveDate) -> String {
    format!(
        "{}/matches/{}/{}",
        BASE_URL,
        sport.slug(),
        date.format("%Y%m%d")
    )
}

/// Parse a listing URL into its sport and date.
///
/// The date segment is optional and defaults to today. Fails with
/// `UrlFormat` when no recognizable sport segment exists or the date does
/// not parse strictly as `yyyymmdd`, and with `UnsupportedSport` when the
/// slug maps to a sport without enumerated period scoring rules.
pub fn resolve(url: &str) -> Result<(Sport, NaiveDate), ScrapeError> {
    let lower = url.to_ascii_lowercase();
    let caps = LISTING_RE
        .captures(&lower)
        .ok_or_else(|| ScrapeError::url_format(url, "no sport segment in path"))?;

    let slug = &caps["sport"];
    let sport = Sport::from_slug(slug)
        .ok_or_else(|| ScrapeError::url_format(url, format!("unknown sport slug {slug:?}")))?;
    if sport.scoring().is_none() {
        return Err(ScrapeError::UnsupportedSport(sport.slug()));
    }

    let date = match caps.name("date") {
        Some(segment) => NaiveDate::parse_from_str(segment.as_str(), "%Y%m%d").map_err(|e| {
            ScrapeError::url_format(url, format!("date segment {:?}: {e}", segment.as_str()))
        })?,
        None => Local::now().date_naive(),
    };

    Ok((sport, date))
}
