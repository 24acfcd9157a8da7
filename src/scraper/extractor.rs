//! Per-node field extraction.
//!
//! Each match node yields team names, an optional grouping header
//! (country + league), a free-text time/status label and the score cells
//! of the currently active period. Country and league are run-length
//! encoded in the listing: stated once per group, implied for following
//! nodes. The prevailing values travel in an explicit [`GroupContext`]
//! threaded through every call, never in ambient state.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ExtractError, SessionError};
use crate::scraper::session::DomSession;
use crate::sports::ScoringRules;
use crate::types::{MatchRecord, MatchStatus, PeriodScore};

/// Team name paragraphs; the site emits the two class orderings
/// interchangeably.
const TEAM_NAME_SELECTORS: [&str; 2] = [
    "p[class=\"truncate participant-name\"]",
    "p[class=\"participant-name truncate\"]",
];

/// Sub-elements of the optional grouping header block.
const HEADER_SELECTOR: &str = "div[set] > div";

const COUNTRY_SELECTORS: [&str; 2] = [
    "p[class=\"truncate max-sm:hidden\"]",
    "p[class=\"max-sm:hidden truncate\"]",
];

/// League link block; the third link carries the league name.
const LEAGUE_LINKS_SELECTOR: &str = "div > a";

const TIME_SELECTOR: &str = "div > div > a > div > div > div p";

const SCORE_BLOCK_SELECTOR: &str = "div > div > a > div > div.flex.w-full > div > div > div > div";

/// Exact `HH:MM` kickoff pattern, 24-hour clock.
static KICKOFF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").unwrap());

/// The listing's break token.
const BREAK_TOKEN: &str = "HT";

/// Prevailing country/league, carried across the per-node fold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupContext {
    pub country: String,
    pub league: String,
}

/// Grouping header of a node that starts a new country/league group.
#[derive(Debug, Clone)]
pub struct GroupHeader {
    pub country: Option<String>,
    pub league: Option<String>,
}

/// Extract one match node.
///
/// Updates `ctx` when the node carries a grouping header. A node without
/// team names is a `MissingField` error the caller drops; it touches
/// neither output nor context.
pub async fn extract_node<S: DomSession>(
    session: &S,
    node: &S::Node,
    rules: &ScoringRules,
    ctx: &mut GroupContext,
) -> Result<MatchRecord, ExtractError> {
    let (home, away) = find_team_nodes(session, node)
        .await?
        .ok_or(ExtractError::MissingField("team names"))?;

    let home_team = session.read_text(&home).await?.trim().to_string();
    let away_team = session.read_text(&away).await?.trim().to_string();
    let mut record = MatchRecord::new(home_team, away_team);

    match read_group_header(session, node).await? {
        Some(header) => {
            if let Some(country) = header.country {
                record.country = country.clone();
                ctx.country = country;
            }
            if let Some(league) = header.league {
                record.league = league.clone();
                ctx.league = league;
            }
        }
        None => {
            record.country = ctx.country.clone();
            record.league = ctx.league.clone();
        }
    }

    if let Some(label_node) = session.query_in(node, TIME_SELECTOR).await? {
        let label = session.read_text(&label_node).await?;
        record.status = classify_status(label.trim());
    }

    read_period_score(session, node, rules, &mut record).await?;

    Ok(record)
}

/// The two required team-name elements, or `None` when neither selector
/// variant yields them.
pub(crate) async fn find_team_nodes<S: DomSession>(
    session: &S,
    node: &S::Node,
) -> Result<Option<(S::Node, S::Node)>, SessionError> {
    for selector in TEAM_NAME_SELECTORS {
        let mut names = session.query_all_in(node, selector).await?;
        if names.len() >= 2 {
            let away = names.swap_remove(1);
            let home = names.swap_remove(0);
            return Ok(Some((home, away)));
        }
    }
    Ok(None)
}

/// Read the grouping header block, `None` when the node carries none.
///
/// The header is exactly three sub-elements; the first holds the country
/// label and the league link block.
pub(crate) async fn read_group_header<S: DomSession>(
    session: &S,
    node: &S::Node,
) -> Result<Option<GroupHeader>, SessionError> {
    let parts = session.query_all_in(node, HEADER_SELECTOR).await?;
    if parts.len() != 3 {
        return Ok(None);
    }
    let league_div = &parts[0];

    let mut country = None;
    for selector in COUNTRY_SELECTORS {
        if let Some(label) = session.query_in(league_div, selector).await? {
            let text = session.read_text(&label).await?.trim().to_string();
            if !text.is_empty() {
                country = Some(text);
            }
            break;
        }
    }

    let mut league = None;
    let links = session.query_all_in(league_div, LEAGUE_LINKS_SELECTOR).await?;
    if links.len() == 3 {
        let text = session.read_text(&links[2]).await?.trim().to_string();
        if !text.is_empty() {
            league = Some(text);
        }
    }

    Ok(Some(GroupHeader { country, league }))
}

/// Classify a free-text time/status label. Rule order is load-bearing:
/// exact `HH:MM` first, then digit concatenation as elapsed minutes,
/// then the break token, else `Unknown`.
pub fn classify_status(label: &str) -> MatchStatus {
    if let Some(caps) = KICKOFF_RE.captures(label) {
        let hour: u32 = caps[1].parse().unwrap_or(0);
        let minute: u32 = caps[2].parse().unwrap_or(0);
        if let Some(time) = chrono::NaiveTime::from_hms_opt(hour, minute, 0) {
            return MatchStatus::ScheduledAt(time);
        }
    }

    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    if let Ok(minutes) = digits.parse::<u32>() {
        return MatchStatus::LiveElapsed(minutes);
    }

    if label == BREAK_TOKEN {
        return MatchStatus::InBreak;
    }

    MatchStatus::Unknown
}

/// Empty cell means "not yet scored", never zero.
pub fn parse_score_cell(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse().ok()
}

/// Read the active period's two score cells and append exactly one
/// `PeriodScore`. Skipped silently when the node has no score block yet.
async fn read_period_score<S: DomSession>(
    session: &S,
    node: &S::Node,
    rules: &ScoringRules,
    record: &mut MatchRecord,
) -> Result<(), SessionError> {
    let Some(block) = session.query_in(node, SCORE_BLOCK_SELECTOR).await? else {
        return Ok(());
    };
    let cells = session.query_all_in(&block, "div").await?;
    if cells.len() < 2 {
        return Ok(());
    }

    let home = parse_score_cell(&session.read_text(&cells[0]).await?);
    let away = parse_score_cell(&session.read_text(&cells[1]).await?);

    let number = record.period_scores.len() as u32 + 1;
    record.period_scores.push(PeriodScore {
        number: Some(number),
        period_type: rules.period_type_for(number),
        home,
        away,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_classify_kickoff_time() {
        assert_eq!(
            classify_status("19:30"),
            MatchStatus::ScheduledAt(NaiveTime::from_hms_opt(19, 30, 0).unwrap())
        );
        assert_eq!(
            classify_status("00:00"),
            MatchStatus::ScheduledAt(NaiveTime::from_hms_opt(0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_classify_live_minutes() {
        assert_eq!(classify_status("45"), MatchStatus::LiveElapsed(45));
        // Digit concatenation over the whole label, as the listing
        // renders live clocks like "90+2'".
        assert_eq!(classify_status("45'"), MatchStatus::LiveElapsed(45));
        assert_eq!(classify_status("90+2'"), MatchStatus::LiveElapsed(902));
    }

    #[test]
    fn test_classify_break_token() {
        assert_eq!(classify_status("HT"), MatchStatus::InBreak);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify_status("postponed"), MatchStatus::Unknown);
        assert_eq!(classify_status(""), MatchStatus::Unknown);
        // 25-hour labels are not kickoff times, and their digits make
        // them live clocks under rule order.
        assert_eq!(classify_status("25:61"), MatchStatus::LiveElapsed(2561));
    }

    #[test]
    fn test_score_cell_parsing() {
        assert_eq!(parse_score_cell(""), None);
        assert_eq!(parse_score_cell("  "), None);
        assert_eq!(parse_score_cell("2"), Some(2));
        assert_eq!(parse_score_cell(" 11 "), Some(11));
        assert_eq!(parse_score_cell("x"), None);
    }
}
