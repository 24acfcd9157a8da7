//! Sport identifiers, URL slugs and per-sport period scoring rules.
//!
//! Everything here is static data. Adding a sport means adding one entry
//! to [`SPORTS`], not touching any control flow.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    Football,
    Basketball,
    Baseball,
    Hockey,
    Tennis,
    Badminton,
    Darts,
    Cricket,
    Mma,
    Esports,
    Handball,
    Futsal,
    Snooker,
    TableTennis,
    Rugby,
    Volleyball,
    Boxing,
    AmericanFootball,
}

/// Scoring sub-unit of a match (half, quarter, inning, set, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodType {
    Half,
    Quarter,
    Inning,
    Set,
    Round,
    Overtime,
    Penalties,
    Period,
    Leg,
}

/// Period naming rules for one sport.
///
/// `periods` is the ordered list of applicable period types. `breaks` maps
/// a period count to an index into `periods`: the first `(max, idx)` entry
/// with `count <= max` wins, otherwise the last period type applies.
/// Football reads as: up to 2 periods are halves, a 3rd is overtime,
/// anything beyond is penalties.
#[derive(Debug, Clone, Copy)]
pub struct ScoringRules {
    periods: &'static [PeriodType],
    breaks: &'static [(u32, usize)],
}

impl ScoringRules {
    /// Period type for the `count`-th period of a match (1-based).
    pub fn period_type_for(&self, count: u32) -> PeriodType {
        for &(max, idx) in self.breaks {
            if count <= max {
                return self.periods[idx];
            }
        }
        self.periods[self.periods.len() - 1]
    }
}

struct SportEntry {
    sport: Sport,
    slug: &'static str,
    scoring: Option<ScoringRules>,
}

const fn rules(
    periods: &'static [PeriodType],
    breaks: &'static [(u32, usize)],
) -> Option<ScoringRules> {
    Some(ScoringRules { periods, breaks })
}

/// Closed bidirectional sport <-> slug table plus scoring rules.
///
/// American football carries no scoring rules; resolving its slug yields
/// `UnsupportedSport` upstream.
const SPORTS: [SportEntry; 18] = [
    SportEntry {
        sport: Sport::Football,
        slug: "football",
        scoring: rules(
            &[PeriodType::Half, PeriodType::Overtime, PeriodType::Penalties],
            &[(2, 0), (3, 1)],
        ),
    },
    SportEntry {
        sport: Sport::Basketball,
        slug: "basketball",
        scoring: rules(&[PeriodType::Quarter, PeriodType::Overtime], &[(4, 0)]),
    },
    SportEntry {
        sport: Sport::Baseball,
        slug: "baseball",
        scoring: rules(&[PeriodType::Inning, PeriodType::Overtime], &[(9, 0)]),
    },
    SportEntry {
        sport: Sport::Hockey,
        slug: "hockey",
        scoring: rules(&[PeriodType::Period, PeriodType::Overtime], &[(3, 0)]),
    },
    SportEntry {
        sport: Sport::Tennis,
        slug: "tennis",
        scoring: rules(&[PeriodType::Set], &[]),
    },
    SportEntry {
        sport: Sport::Badminton,
        slug: "badminton",
        scoring: rules(&[PeriodType::Set], &[]),
    },
    SportEntry {
        sport: Sport::Darts,
        slug: "darts",
        scoring: rules(&[PeriodType::Set], &[]),
    },
    SportEntry {
        sport: Sport::Cricket,
        slug: "cricket",
        scoring: rules(&[PeriodType::Set], &[]),
    },
    SportEntry {
        sport: Sport::Mma,
        slug: "mma",
        scoring: rules(&[PeriodType::Round], &[]),
    },
    SportEntry {
        sport: Sport::Esports,
        slug: "esports",
        scoring: rules(&[PeriodType::Half, PeriodType::Overtime], &[(2, 0)]),
    },
    SportEntry {
        sport: Sport::Handball,
        slug: "handball",
        scoring: rules(&[PeriodType::Half, PeriodType::Overtime], &[(2, 0)]),
    },
    SportEntry {
        sport: Sport::Futsal,
        slug: "futsal",
        scoring: rules(&[PeriodType::Half, PeriodType::Overtime], &[(2, 0)]),
    },
    SportEntry {
        sport: Sport::Snooker,
        slug: "snooker",
        scoring: rules(&[PeriodType::Round], &[]),
    },
    SportEntry {
        sport: Sport::TableTennis,
        slug: "table-tennis",
        scoring: rules(&[PeriodType::Set], &[]),
    },
    SportEntry {
        sport: Sport::Rugby,
        slug: "rugby-union",
        scoring: rules(&[PeriodType::Half, PeriodType::Overtime], &[(2, 0)]),
    },
    SportEntry {
        sport: Sport::Volleyball,
        slug: "volleyball",
        scoring: rules(&[PeriodType::Set], &[]),
    },
    SportEntry {
        sport: Sport::Boxing,
        slug: "boxing",
        scoring: rules(&[PeriodType::Round], &[]),
    },
    SportEntry {
        sport: Sport::AmericanFootball,
        slug: "american-football",
        scoring: None,
    },
];

impl Sport {
    /// Look up a sport by its URL slug.
    pub fn from_slug(slug: &str) -> Option<Sport> {
        SPORTS.iter().find(|e| e.slug == slug).map(|e| e.sport)
    }

    pub fn slug(self) -> &'static str {
        SPORTS
            .iter()
            .find(|e| e.sport == self)
            .map(|e| e.slug)
            .unwrap_or("unknown")
    }

    /// Period scoring rules, `None` when not enumerated for this sport.
    pub fn scoring(self) -> Option<ScoringRules> {
        SPORTS
            .iter()
            .find(|e| e.sport == self)
            .and_then(|e| e.scoring)
    }

    pub fn all() -> impl Iterator<Item = Sport> {
        SPORTS.iter().map(|e| e.sport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip_for_every_sport() {
        for sport in Sport::all() {
            assert_eq!(Sport::from_slug(sport.slug()), Some(sport));
        }
    }

    #[test]
    fn test_table_has_18_entries() {
        assert_eq!(Sport::all().count(), 18);
    }

    #[test]
    fn test_unknown_slug() {
        assert_eq!(Sport::from_slug("curling"), None);
    }

    #[test]
    fn test_badminton_maps_to_badminton() {
        // Regression: the slug table is bidirectional, badminton is not
        // collapsed into tennis.
        assert_eq!(Sport::from_slug("badminton"), Some(Sport::Badminton));
    }

    #[test]
    fn test_football_period_selection() {
        let rules = Sport::Football.scoring().unwrap();
        assert_eq!(rules.period_type_for(1), PeriodType::Half);
        assert_eq!(rules.period_type_for(2), PeriodType::Half);
        assert_eq!(rules.period_type_for(3), PeriodType::Overtime);
        assert_eq!(rules.period_type_for(4), PeriodType::Penalties);
    }

    #[test]
    fn test_basketball_period_selection() {
        let rules = Sport::Basketball.scoring().unwrap();
        assert_eq!(rules.period_type_for(4), PeriodType::Quarter);
        assert_eq!(rules.period_type_for(5), PeriodType::Overtime);
    }

    #[test]
    fn test_baseball_period_selection() {
        let rules = Sport::Baseball.scoring().unwrap();
        assert_eq!(rules.period_type_for(9), PeriodType::Inning);
        assert_eq!(rules.period_type_for(10), PeriodType::Overtime);
    }

    #[test]
    fn test_single_period_sports() {
        let rules = Sport::Tennis.scoring().unwrap();
        assert_eq!(rules.period_type_for(1), PeriodType::Set);
        assert_eq!(rules.period_type_for(5), PeriodType::Set);
    }

    #[test]
    fn test_american_football_has_no_rules() {
        assert!(Sport::AmericanFootball.scoring().is_none());
    }
}
