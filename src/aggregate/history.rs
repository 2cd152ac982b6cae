//! Multi-season views of team records: histories, title counts and win rates.

use std::borrow::Borrow;
use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::domain::{Season, TeamIdentity, TeamSeasonRecord};
use crate::stats::{percentage, round2, SliceExt};

/// Wins as a percentage of matches played. Undefined for a season in which the team played no
/// matches, which includes every suspended season.
pub fn win_percentage(record: &TeamSeasonRecord) -> Option<f64> {
    percentage(record.wins as usize, record.matches_played as usize)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SuspendedSeasons {
    Include,
    Exclude,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub record: TeamSeasonRecord,
    pub win_pct: Option<f64>,
}

/// The season-by-season record of one team, in season order.
pub fn team_history<R: Borrow<TeamSeasonRecord>>(
    team: &str,
    records: &[R],
    suspended_seasons: SuspendedSeasons,
) -> Vec<HistoryEntry> {
    let mut history: Vec<&TeamSeasonRecord> = records
        .iter()
        .map(Borrow::borrow)
        .filter(|record| record.team.name == team)
        .filter(|record| suspended_seasons == SuspendedSeasons::Include || !record.suspended)
        .collect();
    history.sort_by_key(|record| record.season);
    history
        .into_iter()
        .map(|record| HistoryEntry {
            record: record.clone(),
            win_pct: win_percentage(record),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleCount {
    pub team: TeamIdentity,
    pub titles: usize,
}

/// Titles per team, most decorated first. Teams level on titles are ordered by name.
pub fn championship_tally<R: Borrow<TeamSeasonRecord>>(records: &[R]) -> Vec<TitleCount> {
    let mut tally: Vec<TitleCount> = vec![];
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    for record in records.iter().map(Borrow::borrow).filter(|record| record.title_winner) {
        match positions.get(record.name()) {
            Some(&position) => tally[position].titles += 1,
            None => {
                positions.insert(record.name(), tally.len());
                tally.push(TitleCount {
                    team: record.team.clone(),
                    titles: 1,
                });
            }
        }
    }
    tally.sort_by(|a, b| b.titles.cmp(&a.titles).then_with(|| a.team.name.cmp(&b.team.name)));
    tally
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionSeason {
    pub season: Season,
    pub team: TeamIdentity,
    pub wins: u32,
    pub losses: u32,
    pub win_pct: Option<f64>,
    pub net_run_rate: f64,
}

/// The champion of every season that has one, in season order.
pub fn champions_timeline<R: Borrow<TeamSeasonRecord>>(records: &[R]) -> Vec<ChampionSeason> {
    let mut timeline: Vec<ChampionSeason> = records
        .iter()
        .map(Borrow::borrow)
        .filter(|record| record.title_winner)
        .map(|record| ChampionSeason {
            season: record.season,
            team: record.team.clone(),
            wins: record.wins,
            losses: record.losses,
            win_pct: win_percentage(record),
            net_run_rate: round2(record.net_run_rate),
        })
        .collect();
    timeline.sort_by_key(|champion| champion.season);
    timeline
}

/// The seasons in which `team` won the title, in ascending order.
pub fn champion_years<R: Borrow<TeamSeasonRecord>>(team: &str, records: &[R]) -> Vec<Season> {
    let years: BTreeSet<Season> = records
        .iter()
        .map(Borrow::borrow)
        .filter(|record| record.title_winner && record.team.name == team)
        .map(|record| record.season)
        .collect();
    years.into_iter().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageWins {
    pub team: TeamIdentity,
    pub seasons: usize,
    pub average_wins: f64,
}

/// Mean wins per season for each team, over the seasons it took part in. Sorted by the average,
/// highest first, then by name.
pub fn average_wins<R: Borrow<TeamSeasonRecord>>(records: &[R]) -> Vec<AverageWins> {
    let mut teams: Vec<(&TeamIdentity, Vec<u32>)> = vec![];
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    for record in records.iter().map(Borrow::borrow).filter(|record| !record.suspended) {
        match positions.get(record.name()) {
            Some(&position) => teams[position].1.push(record.wins),
            None => {
                positions.insert(record.name(), teams.len());
                teams.push((&record.team, vec![record.wins]));
            }
        }
    }

    let mut averages: Vec<AverageWins> = teams
        .into_iter()
        .filter_map(|(team, wins)| {
            Some(AverageWins {
                team: team.clone(),
                seasons: wins.len(),
                average_wins: round2(wins.mean()?),
            })
        })
        .collect();
    averages.sort_by(|a, b| {
        b.average_wins
            .total_cmp(&a.average_wins)
            .then_with(|| a.team.name.cmp(&b.team.name))
    });
    averages
}

/// Win percentages laid out as teams (ordered by name) against seasons (ascending). A cell is
/// undefined where the team has no record for the season or played no matches in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinPercentageGrid {
    pub seasons: Vec<Season>,
    pub rows: Vec<WinPercentageRow>,
}
impl WinPercentageGrid {
    pub fn cell(&self, team: &str, season: Season) -> Option<f64> {
        let column = self.seasons.iter().position(|&s| s == season)?;
        let row = self.rows.iter().find(|row| row.team.name == team)?;
        row.win_pcts[column]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinPercentageRow {
    pub team: TeamIdentity,
    pub win_pcts: Vec<Option<f64>>,
}

pub fn win_percentage_grid<R: Borrow<TeamSeasonRecord>>(records: &[R]) -> WinPercentageGrid {
    let seasons: Vec<Season> = records
        .iter()
        .map(Borrow::borrow)
        .map(|record: &TeamSeasonRecord| record.season)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut rows: Vec<WinPercentageRow> = vec![];
    for record in records.iter().map(Borrow::borrow) {
        let row = match rows.iter().position(|row| row.team.name == record.team.name) {
            Some(position) => &mut rows[position],
            None => {
                rows.push(WinPercentageRow {
                    team: record.team.clone(),
                    win_pcts: vec![None; seasons.len()],
                });
                let last = rows.len() - 1;
                &mut rows[last]
            }
        };
        if let Ok(column) = seasons.binary_search(&record.season) {
            if !record.suspended {
                row.win_pcts[column] = win_percentage(record);
            }
        }
    }
    rows.sort_by(|a, b| a.team.name.cmp(&b.team.name));
    WinPercentageGrid { seasons, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_defined_near, competed, identity, suspended};

    fn records() -> Vec<TeamSeasonRecord> {
        vec![
            competed("Chennai Super Kings", 2018, 16, 11, 0.253).with_title(),
            competed("Mumbai Indians", 2018, 14, 6, 0.317),
            competed("Mumbai Indians", 2017, 17, 12, 0.784).with_title(),
            suspended("Chennai Super Kings", 2017),
            competed("Chennai Super Kings", 2015, 17, 10, 0.709),
            competed("Mumbai Indians", 2015, 16, 10, -0.04).with_title(),
        ]
    }

    #[test]
    fn win_percentage_defined_and_undefined() {
        assert_defined_near(68.75, win_percentage(&competed("Chennai Super Kings", 2018, 16, 11, 0.253)));
        assert_eq!(None, win_percentage(&suspended("Chennai Super Kings", 2016)));
    }

    #[test]
    fn history_including_and_excluding_suspended() {
        let records = records();
        let history = team_history("Chennai Super Kings", &records, SuspendedSeasons::Include);
        assert_eq!(
            vec![2015, 2017, 2018],
            history.iter().map(|entry| entry.record.season).collect::<Vec<_>>()
        );
        assert_eq!(None, history[1].win_pct);
        assert_eq!(Some(58.82), history[0].win_pct);

        let history = team_history("Chennai Super Kings", &records, SuspendedSeasons::Exclude);
        assert_eq!(
            vec![2015, 2018],
            history.iter().map(|entry| entry.record.season).collect::<Vec<_>>()
        );
        assert!(team_history("Gujarat Titans", &records, SuspendedSeasons::Include).is_empty());
    }

    #[test]
    fn tally_sorted_by_count_then_name() {
        let mut records = records();
        records.push(competed("Kolkata Knight Riders", 2014, 16, 11, 0.418).with_title());
        records.push(competed("Kolkata Knight Riders", 2012, 16, 10, 0.561).with_title());
        records.push(competed("Deccan Chargers", 2009, 14, 7, -0.203).with_title());
        let tally = championship_tally(&records);
        assert_eq!(
            vec![
                ("Kolkata Knight Riders", 2),
                ("Mumbai Indians", 2),
                ("Chennai Super Kings", 1),
                ("Deccan Chargers", 1),
            ],
            tally
                .iter()
                .map(|count| (count.team.name.as_str(), count.titles))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn timeline_in_season_order() {
        let records = records();
        let timeline = champions_timeline(&records);
        assert_eq!(
            vec![
                (2015, "Mumbai Indians"),
                (2017, "Mumbai Indians"),
                (2018, "Chennai Super Kings"),
            ],
            timeline
                .iter()
                .map(|champion| (champion.season, champion.team.name.as_str()))
                .collect::<Vec<_>>()
        );
        assert_eq!(0.25, timeline[2].net_run_rate);
        assert_eq!(Some(68.75), timeline[2].win_pct);
    }

    #[test]
    fn years_of_a_champion() {
        let records = records();
        assert_eq!(vec![2015, 2017], champion_years("Mumbai Indians", &records));
        assert!(champion_years("Delhi Capitals", &records).is_empty());
    }

    #[test]
    fn average_wins_over_completed_seasons() {
        let records = records();
        let averages = average_wins(&records);
        assert_eq!(
            vec![
                AverageWins {
                    team: identity("Chennai Super Kings"),
                    seasons: 2,
                    average_wins: 10.5
                },
                AverageWins {
                    team: identity("Mumbai Indians"),
                    seasons: 3,
                    average_wins: 9.33
                },
            ],
            averages
        );
    }

    #[test]
    fn grid_of_teams_against_seasons() {
        let records = records();
        let grid = win_percentage_grid(&records);
        assert_eq!(vec![2015, 2017, 2018], grid.seasons);
        assert_eq!(
            vec!["Chennai Super Kings", "Mumbai Indians"],
            grid.rows.iter().map(|row| row.team.name.as_str()).collect::<Vec<_>>()
        );
        assert_eq!(vec![Some(58.82), None, Some(68.75)], grid.rows[0].win_pcts);
        assert_eq!(Some(70.59), grid.cell("Mumbai Indians", 2017));
        assert_eq!(None, grid.cell("Mumbai Indians", 2016));
        assert_eq!(None, grid.cell("Rising Pune Supergiant", 2017));
    }

    #[test]
    fn views_of_nothing() {
        let records: Vec<TeamSeasonRecord> = vec![];
        assert!(championship_tally(&records).is_empty());
        assert!(champions_timeline(&records).is_empty());
        assert!(average_wins(&records).is_empty());
        let grid = win_percentage_grid(&records);
        assert!(grid.seasons.is_empty() && grid.rows.is_empty());
    }
}
