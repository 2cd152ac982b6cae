use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::display::UNDEFINED;
use crate::domain::{Season, TeamIdentity, TeamSeasonRecord};
use crate::stats::round2;

/// One row of a season points table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub position: usize,
    pub team: TeamIdentity,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub points: u32,
    pub net_run_rate: f64,
}

/// Ranks the supplied records by points, then by net run rate, both descending. The sort is
/// stable, so teams level on both keys keep their input order. Suspended records are left out.
pub fn standings<R: Borrow<TeamSeasonRecord>>(records: &[R]) -> Vec<StandingsRow> {
    let mut active: Vec<&TeamSeasonRecord> = records
        .iter()
        .map(Borrow::borrow)
        .filter(|record| !record.suspended)
        .collect();
    active.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.net_run_rate.total_cmp(&a.net_run_rate))
    });
    active
        .into_iter()
        .enumerate()
        .map(|(index, record)| StandingsRow {
            position: index + 1,
            team: record.team.clone(),
            played: record.matches_played,
            won: record.wins,
            lost: record.losses,
            points: record.points,
            net_run_rate: round2(record.net_run_rate),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Champion {
    Crowned(TeamIdentity),
    Undecided,
}
impl Champion {
    pub fn team(&self) -> Option<&TeamIdentity> {
        match self {
            Champion::Crowned(team) => Some(team),
            Champion::Undecided => None,
        }
    }
}

impl Display for Champion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Champion::Crowned(team) => write!(f, "{}", team.name),
            Champion::Undecided => write!(f, "{UNDEFINED}"),
        }
    }
}

/// The title winner of `season`. A suspended record cannot hold the title, so one marked as such
/// is disregarded.
pub fn champion<R: Borrow<TeamSeasonRecord>>(season: Season, records: &[R]) -> Champion {
    records
        .iter()
        .map(Borrow::borrow)
        .find(|record| record.season == season && record.title_winner && !record.suspended)
        .map(|record| Champion::Crowned(record.team.clone()))
        .unwrap_or(Champion::Undecided)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MostWins {
    pub team: TeamIdentity,
    pub wins: u32,
}

/// The active record with the most wins. Among records level on wins, the first one encountered
/// is returned; callers should not rely on which of the tied teams that is.
pub fn most_wins<R: Borrow<TeamSeasonRecord>>(records: &[R]) -> Option<MostWins> {
    let mut leader: Option<&TeamSeasonRecord> = None;
    for record in records.iter().map(Borrow::borrow).filter(|record| !record.suspended) {
        match leader {
            Some(current) if current.wins >= record.wins => {}
            _ => leader = Some(record),
        }
    }
    leader.map(|record| MostWins {
        team: record.team.clone(),
        wins: record.wins,
    })
}
