//! Extraction result types.
//!
//! One [`Extraction`] per run, owning its match records; records own their
//! period scores. Nothing here is persisted, the run is the unit of
//! lifetime.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sports::{PeriodType, Sport};

/// Result of one extraction run over a single listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    pub sport: Sport,
    pub date: NaiveDate,
    pub matches: Vec<MatchRecord>,
}

/// Kickoff/live state of a match. Exactly one signal at a time.
///
/// `Unknown` means the status label was unparseable (the listing shows
/// free text like "postponed" or "canc."); it is rendered without a
/// status prefix and carries no further semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum MatchStatus {
    /// Scheduled kickoff time, local to the listing.
    ScheduledAt(NaiveTime),
    /// Minutes elapsed in an in-progress match.
    LiveElapsed(u32),
    /// Between periods (the listing's "HT" token).
    InBreak,
    Unknown,
}

/// Score contribution of one period. `None` means "not yet scored",
/// never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodScore {
    pub number: Option<u32>,
    pub period_type: PeriodType,
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    /// Country and league are inherited from the nearest preceding
    /// grouping header when the node itself carries none.
    pub country: String,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    pub status: MatchStatus,
    pub period_scores: Vec<PeriodScore>,
}

impl MatchRecord {
    pub fn new(home_team: String, away_team: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            country: String::new(),
            league: String::new(),
            home_team,
            away_team,
            status: MatchStatus::Unknown,
            period_scores: Vec::new(),
        }
    }

    /// Sum of scored periods, `None` when no period has a home score yet.
    pub fn home_total(&self) -> Option<u32> {
        total(self.period_scores.iter().map(|p| p.home))
    }

    /// Sum of scored periods, `None` when no period has an away score yet.
    pub fn away_total(&self) -> Option<u32> {
        total(self.period_scores.iter().map(|p| p.away))
    }
}

fn total(scores: impl Iterator<Item = Option<u32>>) -> Option<u32> {
    let mut sum = None;
    for score in scores.flatten() {
        sum = Some(sum.unwrap_or(0) + score);
    }
    sum
}
