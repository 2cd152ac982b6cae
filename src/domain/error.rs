//! Structural invariants of the record streams, and the errors raised when a record breaks them.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::display::DisplaySlice;
use crate::domain::{Match, PlayerSeasonStat, Season, TeamSeasonRecord, POINTS_PER_WIN};


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRecord {
    #[error("{0}")]
    Match(#[from] InvalidMatch),

    #[error("{0}")]
    TeamSeason(#[from] InvalidTeamSeason),

    #[error("{0}")]
    Season(#[from] InvalidSeason),

    #[error("{0}")]
    PlayerSeason(#[from] InvalidPlayerSeason),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMatch {
    #[error("match {id} is won by both {runs} runs and {wickets} wickets")]
    AmbiguousMargin { id: u32, runs: u32, wickets: u32 },

    #[error("match {id} records a winning margin but no winner")]
    MarginWithoutWinner { id: u32 },

    #[error("match {id} pits {team} against itself")]
    SameTeams { id: u32, team: String },

    #[error("match {id} is won by {winner}, who did not play")]
    WinnerNotPlaying { id: u32, winner: String },

    #[error("match {id} toss is won by {toss_winner}, who did not play")]
    TossWinnerNotPlaying { id: u32, toss_winner: String },

    #[error("match {id} is duplicated")]
    Duplicate { id: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTeamSeason {
    #[error("{team} in {season}: {wins} wins + {losses} losses ≠ {played} played")]
    Tally {
        team: String,
        season: Season,
        played: u32,
        wins: u32,
        losses: u32,
    },

    #[error("{team} in {season}: {points} points ≠ 2 × {wins} wins")]
    Points {
        team: String,
        season: Season,
        points: u32,
        wins: u32,
    },

    #[error("{team} in {season}: suspended with {played} played, {wins} wins, {losses} losses, {points} points")]
    SuspendedWithResults {
        team: String,
        season: Season,
        played: u32,
        wins: u32,
        losses: u32,
        points: u32,
    },

    #[error("{team} in {season}: suspended yet marked as title winner")]
    SuspendedChampion { team: String, season: Season },

    #[error("{team} in {season}: duplicate team-season record")]
    Duplicate { team: String, season: Season },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSeason {
    #[error("season {season} has more than one title winner: {}", DisplaySlice::from(.teams.as_slice()))]
    MultipleChampions { season: Season, teams: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPlayerSeason {
    #[error("player {player_id} in {season}: duplicate player-season record")]
    Duplicate { player_id: u32, season: Season },
}

impl Match {
    pub fn validate(&self) -> Result<(), InvalidMatch> {
        MarginAssertion::check(self)?;
        ParticipantsAssertion::check(self)?;
        Ok(())
    }
}

impl TeamSeasonRecord {
    pub fn validate(&self) -> Result<(), InvalidTeamSeason> {
        if self.suspended {
            SuspensionAssertion::check(self)
        } else {
            TallyAssertion::check(self)?;
            PointsAssertion::check(self)
        }
    }
}

/// A match is won by runs or by wickets, never both, and only if somebody won it.
pub struct MarginAssertion;
impl MarginAssertion {
    pub fn check(m: &Match) -> Result<(), InvalidMatch> {
        if m.win_by_runs > 0 && m.win_by_wickets > 0 {
            return Err(InvalidMatch::AmbiguousMargin {
                id: m.id,
                runs: m.win_by_runs,
                wickets: m.win_by_wickets,
            });
        }
        if m.winner.is_none() && (m.win_by_runs > 0 || m.win_by_wickets > 0) {
            return Err(InvalidMatch::MarginWithoutWinner { id: m.id });
        }
        Ok(())
    }
}

/// The winner and the toss winner must be one of the two sides, and the sides must differ.
pub struct ParticipantsAssertion;
impl ParticipantsAssertion {
    pub fn check(m: &Match) -> Result<(), InvalidMatch> {
        if m.team1 == m.team2 {
            return Err(InvalidMatch::SameTeams {
                id: m.id,
                team: m.team1.clone(),
            });
        }
        if let Some(winner) = &m.winner {
            if !m.involves(winner) {
                return Err(InvalidMatch::WinnerNotPlaying {
                    id: m.id,
                    winner: winner.clone(),
                });
            }
        }
        if !m.involves(&m.toss_winner) {
            return Err(InvalidMatch::TossWinnerNotPlaying {
                id: m.id,
                toss_winner: m.toss_winner.clone(),
            });
        }
        Ok(())
    }
}

pub struct TallyAssertion;
impl TallyAssertion {
    pub fn check(record: &TeamSeasonRecord) -> Result<(), InvalidTeamSeason> {
        if record.wins as u64 + record.losses as u64 != record.matches_played as u64 {
            Err(InvalidTeamSeason::Tally {
                team: record.team.name.clone(),
                season: record.season,
                played: record.matches_played,
                wins: record.wins,
                losses: record.losses,
            })
        } else {
            Ok(())
        }
    }
}

pub struct PointsAssertion;
impl PointsAssertion {
    pub fn check(record: &TeamSeasonRecord) -> Result<(), InvalidTeamSeason> {
        if record.points as u64 != record.wins as u64 * POINTS_PER_WIN as u64 {
            Err(InvalidTeamSeason::Points {
                team: record.team.name.clone(),
                season: record.season,
                points: record.points,
                wins: record.wins,
            })
        } else {
            Ok(())
        }
    }
}

/// A suspended team contributes nothing to its season.
pub struct SuspensionAssertion;
impl SuspensionAssertion {
    pub fn check(record: &TeamSeasonRecord) -> Result<(), InvalidTeamSeason> {
        if record.matches_played != 0 || record.wins != 0 || record.losses != 0 || record.points != 0 {
            return Err(InvalidTeamSeason::SuspendedWithResults {
                team: record.team.name.clone(),
                season: record.season,
                played: record.matches_played,
                wins: record.wins,
                losses: record.losses,
                points: record.points,
            });
        }
        if record.title_winner {
            return Err(InvalidTeamSeason::SuspendedChampion {
                team: record.team.name.clone(),
                season: record.season,
            });
        }
        Ok(())
    }
}

/// Checks that no two records share a key. The first occurrence of a key is accepted; the indexes
/// of every later occurrence are returned alongside the error built for it.
pub struct UniqueKeyAssertion;
impl UniqueKeyAssertion {
    pub fn check<T, K, E>(
        records: &[T],
        mut key: impl FnMut(&T) -> K,
        mut error: impl FnMut(&T) -> E,
    ) -> Vec<(usize, E)>
    where
        K: Eq + std::hash::Hash,
    {
        let mut seen = FxHashMap::with_capacity_and_hasher(records.len(), Default::default());
        let mut duplicates = vec![];
        for (index, record) in records.iter().enumerate() {
            match seen.entry(key(record)) {
                Entry::Occupied(_) => duplicates.push((index, error(record))),
                Entry::Vacant(entry) => {
                    entry.insert(index);
                }
            }
        }
        duplicates
    }
}

/// At most one team may lift the title in a given season. Returns the indexes of every title
/// winner in an offending season, so that the season as a whole can be set aside.
pub struct SingleChampionAssertion;
impl SingleChampionAssertion {
    pub fn check(records: &[TeamSeasonRecord]) -> Vec<(Vec<usize>, InvalidSeason)> {
        let mut champions: FxHashMap<Season, Vec<usize>> = FxHashMap::default();
        let mut seasons = vec![];
        for (index, record) in records.iter().enumerate() {
            if record.title_winner {
                let indexes = champions.entry(record.season).or_default();
                if indexes.is_empty() {
                    seasons.push(record.season);
                }
                indexes.push(index);
            }
        }

        seasons
            .into_iter()
            .filter_map(|season| {
                let indexes = champions.remove(&season)?;
                if indexes.len() > 1 {
                    let teams = indexes.iter().map(|&index| records[index].team.name.clone()).collect();
                    Some((indexes, InvalidSeason::MultipleChampions { season, teams }))
                } else {
                    None
                }
            })
            .collect()
    }
}

pub(crate) fn duplicate_matches(matches: &[Match]) -> Vec<(usize, InvalidMatch)> {
    UniqueKeyAssertion::check(matches, |m| m.id, |m| InvalidMatch::Duplicate { id: m.id })
}

pub(crate) fn duplicate_team_seasons(records: &[TeamSeasonRecord]) -> Vec<(usize, InvalidTeamSeason)> {
    UniqueKeyAssertion::check(
        records,
        |record| (record.team.name.clone(), record.season),
        |record| InvalidTeamSeason::Duplicate {
            team: record.team.name.clone(),
            season: record.season,
        },
    )
}

pub(crate) fn duplicate_player_seasons(players: &[PlayerSeasonStat]) -> Vec<(usize, InvalidPlayerSeason)> {
    UniqueKeyAssertion::check(
        players,
        |player| (player.player_id, player.season),
        |player| InvalidPlayerSeason::Duplicate {
            player_id: player.player_id,
            season: player.season,
        },
    )
}
