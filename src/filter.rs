//! Season and team predicates that carve working subsets out of the record streams.
//!
//! Filtering never mutates or reorders its input: the subset is a vector of references into the
//! original slice, in the original order. An empty subset is a valid answer, including for a
//! season or team that the data has never heard of.

use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Match, PlayerSeasonStat, Season, TeamSeasonRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamFilter {
    #[default]
    All,
    Team(String),
}
impl TeamFilter {
    pub fn team(name: impl Into<String>) -> Self {
        Self::Team(name.into())
    }

    pub fn as_team(&self) -> Option<&str> {
        match self {
            TeamFilter::All => None,
            TeamFilter::Team(name) => Some(name),
        }
    }

    pub fn admits(&self, record: &impl Filterable) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Team(name) => record.belongs_to(name),
        }
    }
}

impl FromStr for TeamFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("all teams") {
            Ok(TeamFilter::All)
        } else {
            Ok(TeamFilter::Team(trimmed.to_string()))
        }
    }
}

impl Display for TeamFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamFilter::All => write!(f, "All Teams"),
            TeamFilter::Team(name) => write!(f, "{name}"),
        }
    }
}

/// A record that belongs to a season and can be attributed to a team.
pub trait Filterable {
    fn season(&self) -> Season;

    fn belongs_to(&self, team: &str) -> bool;
}

impl Filterable for Match {
    fn season(&self) -> Season {
        self.season
    }

    fn belongs_to(&self, team: &str) -> bool {
        self.involves(team)
    }
}

impl Filterable for PlayerSeasonStat {
    fn season(&self) -> Season {
        self.season
    }

    fn belongs_to(&self, team: &str) -> bool {
        self.team == team
    }
}

impl Filterable for TeamSeasonRecord {
    fn season(&self) -> Season {
        self.season
    }

    fn belongs_to(&self, team: &str) -> bool {
        self.team.name == team
    }
}

/// Records of the given `season` admitted by the `team` filter.
pub fn filter<'a, R: Filterable>(records: &'a [R], season: Season, team: &TeamFilter) -> Vec<&'a R> {
    records
        .iter()
        .filter(|record| record.season() == season && team.admits(*record))
        .collect()
}

/// Records of every season admitted by the `team` filter.
pub fn filter_all_seasons<'a, R: Filterable>(records: &'a [R], team: &TeamFilter) -> Vec<&'a R> {
    records.iter().filter(|record| team.admits(*record)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{competed, match_won_by_runs, match_won_by_wickets, suspended};

    fn matches() -> Vec<Match> {
        vec![
            match_won_by_runs(1, 2016, "Mumbai Indians", "Delhi Capitals", 12),
            match_won_by_wickets(2, 2016, "Gujarat Lions", "Mumbai Indians", 3),
            match_won_by_runs(3, 2017, "Mumbai Indians", "Gujarat Lions", 40),
            match_won_by_wickets(4, 2016, "Delhi Capitals", "Gujarat Lions", 7),
        ]
    }

    #[test]
    fn parse_team_filter() {
        assert_eq!(TeamFilter::All, TeamFilter::from_str("All").unwrap());
        assert_eq!(TeamFilter::All, TeamFilter::from_str("All Teams").unwrap());
        assert_eq!(TeamFilter::All, TeamFilter::from_str("  ").unwrap());
        assert_eq!(
            TeamFilter::team("Mumbai Indians"),
            TeamFilter::from_str(" Mumbai Indians ").unwrap()
        );
        assert_eq!("All Teams", TeamFilter::All.to_string());
    }

    #[test]
    fn filter_matches_by_season() {
        let matches = matches();
        let subset = filter(&matches, 2016, &TeamFilter::All);
        assert_eq!(vec![1, 2, 4], subset.iter().map(|m| m.id).collect::<Vec<_>>());
    }

    #[test]
    fn filter_matches_by_either_side() {
        let matches = matches();
        let subset = filter(&matches, 2016, &TeamFilter::team("Mumbai Indians"));
        assert_eq!(vec![1, 2], subset.iter().map(|m| m.id).collect::<Vec<_>>());

        let subset = filter(&matches, 2016, &TeamFilter::team("Gujarat Lions"));
        assert_eq!(vec![2, 4], subset.iter().map(|m| m.id).collect::<Vec<_>>());
    }

    #[test]
    fn team_subset_never_exceeds_all() {
        let matches = matches();
        for season in [2015, 2016, 2017] {
            let all = filter(&matches, season, &TeamFilter::All);
            for team in ["Mumbai Indians", "Delhi Capitals", "Gujarat Lions", "Unknown"] {
                let subset = filter(&matches, season, &TeamFilter::team(team));
                assert!(subset.len() <= all.len());
                assert!(subset.iter().all(|m| m.season == season && m.involves(team)));
            }
        }
    }

    #[test]
    fn unknown_season_or_team_is_empty() {
        let matches = matches();
        assert!(filter(&matches, 1999, &TeamFilter::All).is_empty());
        assert!(filter(&matches, 2016, &TeamFilter::team("Deccan Chargers")).is_empty());
    }

    #[test]
    fn filter_team_seasons() {
        let records = vec![
            competed("Mumbai Indians", 2016, 14, 7, 0.1),
            suspended("Chennai Super Kings", 2016),
            competed("Chennai Super Kings", 2018, 16, 11, 0.25),
        ];
        let subset = filter(&records, 2016, &TeamFilter::All);
        assert_eq!(2, subset.len());
        assert_eq!("Chennai Super Kings", subset[1].name());

        let subset = filter(&records, 2016, &TeamFilter::team("Chennai Super Kings"));
        assert_eq!(1, subset.len());
        assert!(subset[0].suspended);
    }

    #[test]
    fn filter_across_seasons() {
        let records = vec![
            competed("Mumbai Indians", 2016, 14, 7, 0.1),
            competed("Delhi Capitals", 2016, 14, 6, -0.1),
            competed("Mumbai Indians", 2017, 14, 10, 0.8),
        ];
        let subset = filter_all_seasons(&records, &TeamFilter::team("Mumbai Indians"));
        assert_eq!(vec![2016, 2017], subset.iter().map(|r| r.season).collect::<Vec<_>>());
        assert_eq!(3, filter_all_seasons(&records, &TeamFilter::All).len());
    }
}
