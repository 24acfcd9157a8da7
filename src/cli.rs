//! Command-line interface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::sports::Sport;

#[derive(Parser)]
#[command(name = "matchscan")]
#[command(version, about = "Scrape daily match listings from oddsportal.com", long_about = None)]
pub struct Cli {
    /// Listing URL; built from --sport/--date when omitted
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Sport slug (football, basketball, table-tennis, ...)
    #[arg(short, long, value_parser = parse_sport)]
    pub sport: Option<Sport>,

    /// Listing date as yyyymmdd; defaults to today
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Extract chunks concurrently (seeded grouping baselines)
    #[arg(long)]
    pub parallel: bool,

    /// Emit the extraction as JSON instead of the console table
    #[arg(long)]
    pub json: bool,

    /// Parse a saved HTML file instead of driving a browser
    /// (requires --sport)
    #[arg(long, value_name = "FILE")]
    pub from_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_sport(value: &str) -> Result<Sport, String> {
    Sport::from_slug(value).ok_or_else(|| format!("unknown sport slug {value:?}"))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y%m%d")
        .map_err(|e| format!("expected yyyymmdd date: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sport_slug() {
        assert_eq!(parse_sport("rugby-union"), Ok(Sport::Rugby));
        assert!(parse_sport("chess").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("20260828"),
            Ok(NaiveDate::from_ymd_opt(2026, 8, 28).unwrap())
        );
        assert!(parse_date("2026-08-28").is_err());
    }
}
