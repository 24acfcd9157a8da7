//! matchscan: scrapes daily match listings (teams, per-period scores,
//! kickoff/live status, country/league grouping) from oddsportal.com.

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod resolver;
pub mod retry;
pub mod scraper;
pub mod sports;
pub mod types;
