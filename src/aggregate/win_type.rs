use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Match, Season};
use crate::stats::percentage;

/// How the matches in a subset were decided. The percentages are taken over every match in the
/// subset, no-results included, and are undefined for an empty subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinTypeSplit {
    pub matches: usize,
    pub by_runs: usize,
    pub by_wickets: usize,
    pub by_runs_pct: Option<f64>,
    pub by_wickets_pct: Option<f64>,
}
impl WinTypeSplit {
    fn tally<'a>(matches: impl Iterator<Item = &'a Match>) -> Self {
        let (mut total, mut by_runs, mut by_wickets) = (0, 0, 0);
        for m in matches {
            total += 1;
            if m.win_by_runs > 0 {
                by_runs += 1;
            } else if m.win_by_wickets > 0 {
                by_wickets += 1;
            }
        }
        Self {
            matches: total,
            by_runs,
            by_wickets,
            by_runs_pct: percentage(by_runs, total),
            by_wickets_pct: percentage(by_wickets, total),
        }
    }
}

pub fn win_type_split<M: Borrow<Match>>(matches: &[M]) -> WinTypeSplit {
    WinTypeSplit::tally(matches.iter().map(Borrow::borrow))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonWinTypes {
    pub season: Season,
    pub split: WinTypeSplit,
}

/// The win-type split of every season present in `matches`, in season order.
pub fn win_type_by_season<M: Borrow<Match>>(matches: &[M]) -> Vec<SeasonWinTypes> {
    group_by_season(matches)
        .into_iter()
        .map(|(season, matches)| SeasonWinTypes {
            season,
            split: WinTypeSplit::tally(matches.into_iter()),
        })
        .collect()
}

/// Buckets matches by season, keeping input order within each bucket.
pub(crate) fn group_by_season<M: Borrow<Match>>(matches: &[M]) -> BTreeMap<Season, Vec<&Match>> {
    let mut seasons: BTreeMap<Season, Vec<&Match>> = BTreeMap::new();
    for m in matches.iter().map(Borrow::borrow) {
        seasons.entry(m.season).or_default().push(m);
    }
    seasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{match_won_by_runs, match_won_by_wickets};

    #[test]
    fn split_with_no_result() {
        let mut washout = match_won_by_runs(3, 2019, "Rajasthan Royals", "Kolkata Knight Riders", 0);
        washout.winner = None;
        let matches = vec![
            match_won_by_runs(1, 2019, "Mumbai Indians", "Chennai Super Kings", 37),
            match_won_by_wickets(2, 2019, "Mumbai Indians", "Chennai Super Kings", 6),
            washout,
            match_won_by_wickets(4, 2019, "Delhi Capitals", "Kings XI Punjab", 5),
        ];
        let split = win_type_split(&matches);
        assert_eq!(4, split.matches);
        assert_eq!(1, split.by_runs);
        assert_eq!(2, split.by_wickets);
        assert_eq!(Some(25.0), split.by_runs_pct);
        assert_eq!(Some(50.0), split.by_wickets_pct);
    }

    #[test]
    fn split_by_season() {
        let matches = vec![
            match_won_by_runs(1, 2009, "Mumbai Indians", "Chennai Super Kings", 19),
            match_won_by_wickets(2, 2008, "Mumbai Indians", "Chennai Super Kings", 9),
            match_won_by_wickets(3, 2009, "Deccan Chargers", "Delhi Daredevils", 2),
            match_won_by_wickets(4, 2009, "Deccan Chargers", "Delhi Daredevils", 1),
        ];
        let trend = win_type_by_season(&matches);
        assert_eq!(vec![2008, 2009], trend.iter().map(|entry| entry.season).collect::<Vec<_>>());
        assert_eq!(Some(0.0), trend[0].split.by_runs_pct);
        assert_eq!(Some(100.0), trend[0].split.by_wickets_pct);
        assert_eq!(Some(33.33), trend[1].split.by_runs_pct);
        assert_eq!(Some(66.67), trend[1].split.by_wickets_pct);
    }

    #[test]
    fn group_keeps_input_order() {
        let matches = vec![
            match_won_by_runs(8, 2010, "Mumbai Indians", "Chennai Super Kings", 19),
            match_won_by_runs(3, 2010, "Mumbai Indians", "Chennai Super Kings", 19),
        ];
        let seasons = group_by_season(&matches);
        assert_eq!(vec![8, 3], seasons[&2010].iter().map(|m| m.id).collect::<Vec<_>>());
    }
}
