//! Console rendering of an extraction result.
//!
//! Thin presentation glue: one line per match, status prefix first, then
//! home team, colored totals, away team. Leading side green, trailing
//! side red, draws yellow.

use std::fmt::Write;

use crate::types::{Extraction, MatchStatus};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

pub fn render(extraction: &Extraction) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} matches for {} on {}",
        extraction.matches.len(),
        extraction.sport.slug(),
        extraction.date
    );

    for record in &extraction.matches {
        match record.status {
            MatchStatus::ScheduledAt(time) => {
                let _ = write!(out, "{} ", time.format("%H:%M"));
            }
            MatchStatus::LiveElapsed(minutes) => {
                let _ = write!(out, "{RED}{minutes}'{RESET} ");
            }
            MatchStatus::InBreak => out.push_str("HT "),
            MatchStatus::Unknown => {}
        }

        let _ = write!(out, "{} ", record.home_team);

        let home = record.home_total();
        let away = record.away_total();
        let (home_color, away_color) = match (home, away) {
            (Some(h), Some(a)) if h > a => (GREEN, RED),
            (Some(h), Some(a)) if h < a => (RED, GREEN),
            (Some(_), Some(_)) => (YELLOW, YELLOW),
            _ => ("", ""),
        };

        if let Some(score) = home {
            let _ = write!(out, "{home_color}{score}{RESET} ");
        }
        out.push_str("- ");
        if let Some(score) = away {
            let _ = write!(out, "{away_color}{score}{RESET} ");
        }

        let _ = writeln!(out, "{}", record.away_team);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sports::{PeriodType, Sport};
    use crate::types::{MatchRecord, PeriodScore};
    use chrono::NaiveDate;

    fn extraction() -> Extraction {
        let mut record = MatchRecord::new("Arsenal".into(), "Chelsea".into());
        record.status = MatchStatus::LiveElapsed(45);
        record.period_scores.push(PeriodScore {
            number: Some(1),
            period_type: PeriodType::Half,
            home: Some(2),
            away: Some(1),
        });
        Extraction {
            sport: Sport::Football,
            date: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
            matches: vec![record],
        }
    }

    #[test]
    fn test_render_live_match() {
        let out = render(&extraction());
        assert!(out.contains("45'"));
        assert!(out.contains("Arsenal"));
        assert!(out.contains("Chelsea"));
        // Home side leads, so its total is green.
        assert!(out.contains(&format!("{GREEN}2{RESET}")));
        assert!(out.contains(&format!("{RED}1{RESET}")));
    }

    #[test]
    fn test_render_unscored_match() {
        let mut extraction = extraction();
        extraction.matches[0].status = MatchStatus::Unknown;
        extraction.matches[0].period_scores.clear();
        let out = render(&extraction);
        assert!(out.contains("Arsenal - Chelsea"));
        assert!(!out.contains("45'"));
    }
}
