//! The in-memory record store. Records are validated once, at ingestion, and are never mutated
//! afterwards; every derived view is a fresh projection over the stored slices.
//!
//! A store is built either strictly, rejecting the whole batch if any record is invalid, or
//! leniently, setting the offending records aside as flagged and keeping the rest.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::display::DisplaySlice;
use crate::domain::error::{
    duplicate_matches, duplicate_player_seasons, duplicate_team_seasons, InvalidRecord, SingleChampionAssertion,
};
use crate::domain::{Match, PlayerSeasonStat, Season, TeamIdentity, TeamSeasonRecord};

/// The three record streams as they arrive from a data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub players: Vec<PlayerSeasonStat>,
    #[serde(default)]
    pub teams: Vec<TeamSeasonRecord>,
}
impl Dataset {
    /// Validates every record, returning all violations found. An empty vector means the dataset
    /// is sound.
    pub fn validate(&self) -> Vec<InvalidRecord> {
        Audit::run(self).findings.into_iter().map(|finding| finding.error).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("dataset rejected with {} invalid record(s): {}", .errors.len(), DisplaySlice::from(.errors.as_slice()))]
pub struct RejectedDataset {
    pub errors: Vec<InvalidRecord>,
}

/// A record set aside by a lenient store, along with the first invariant it was found to break.
#[derive(Debug, Clone, PartialEq)]
pub struct Flagged {
    pub record: FlaggedRecord,
    pub error: InvalidRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlaggedRecord {
    Match(Match),
    PlayerSeason(PlayerSeasonStat),
    TeamSeason(TeamSeasonRecord),
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    matches: Vec<Match>,
    players: Vec<PlayerSeasonStat>,
    teams: Vec<TeamSeasonRecord>,
    flagged: Vec<Flagged>,
}
impl RecordStore {
    /// Admits the dataset only if every record in it is valid.
    pub fn try_new(dataset: Dataset) -> Result<Self, RejectedDataset> {
        let audit = Audit::run(&dataset);
        if !audit.findings.is_empty() {
            let errors: Vec<_> = audit.findings.into_iter().map(|finding| finding.error).collect();
            debug!("rejecting dataset with {} invalid record(s)", errors.len());
            return Err(RejectedDataset { errors });
        }
        debug!(
            "loaded {} matches, {} player seasons, {} team seasons",
            dataset.matches.len(),
            dataset.players.len(),
            dataset.teams.len()
        );
        Ok(Self {
            matches: dataset.matches,
            players: dataset.players,
            teams: dataset.teams,
            flagged: vec![],
        })
    }

    /// Admits the valid records of the dataset and sets the invalid ones aside as flagged.
    pub fn lenient(dataset: Dataset) -> Self {
        let audit = Audit::run(&dataset);
        let mut errors = FxHashMap::default();
        for finding in audit.findings {
            warn!("flagging invalid record: {}", finding.error);
            for location in finding.locations {
                errors.entry(location).or_insert_with(|| finding.error.clone());
            }
        }

        let mut flagged = Vec::with_capacity(errors.len());
        let Dataset { matches, players, teams } = dataset;
        let matches = partition(matches, &errors, &mut flagged, Location::Match, FlaggedRecord::Match);
        let players = partition(players, &errors, &mut flagged, Location::PlayerSeason, FlaggedRecord::PlayerSeason);
        let teams = partition(teams, &errors, &mut flagged, Location::TeamSeason, FlaggedRecord::TeamSeason);

        debug!(
            "loaded {} matches, {} player seasons, {} team seasons; flagged {}",
            matches.len(),
            players.len(),
            teams.len(),
            flagged.len()
        );
        Self {
            matches,
            players,
            teams,
            flagged,
        }
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn players(&self) -> &[PlayerSeasonStat] {
        &self.players
    }

    pub fn teams(&self) -> &[TeamSeasonRecord] {
        &self.teams
    }

    /// Records rejected by a lenient store. Always empty for a strictly built store.
    pub fn flagged(&self) -> &[Flagged] {
        &self.flagged
    }

    /// Every season mentioned by any of the three streams, in ascending order.
    pub fn seasons(&self) -> Vec<Season> {
        let seasons: BTreeSet<Season> = self
            .matches
            .iter()
            .map(|m| m.season)
            .chain(self.players.iter().map(|player| player.season))
            .chain(self.teams.iter().map(|record| record.season))
            .collect();
        seasons.into_iter().collect()
    }

    /// Identities of the teams holding a record in `season`, suspended ones included, in input
    /// order.
    pub fn teams_in_season(&self, season: Season) -> Vec<&TeamIdentity> {
        self.teams
            .iter()
            .filter(|record| record.season == season)
            .map(|record| &record.team)
            .collect()
    }

    /// Every distinct team identity across all seasons, ordered by name.
    pub fn franchises(&self) -> Vec<&TeamIdentity> {
        let mut franchises: Vec<&TeamIdentity> = vec![];
        for record in &self.teams {
            if !franchises.iter().any(|team| team.name == record.team.name) {
                franchises.push(&record.team);
            }
        }
        franchises.sort_by(|a, b| a.name.cmp(&b.name));
        franchises
    }
}

impl TryFrom<Dataset> for RecordStore {
    type Error = RejectedDataset;

    fn try_from(dataset: Dataset) -> Result<Self, Self::Error> {
        Self::try_new(dataset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Location {
    Match(usize),
    PlayerSeason(usize),
    TeamSeason(usize),
}

struct Finding {
    locations: Vec<Location>,
    error: InvalidRecord,
}

struct Audit {
    findings: Vec<Finding>,
}
impl Audit {
    fn run(dataset: &Dataset) -> Self {
        let mut findings = vec![];
        let mut push = |locations: Vec<Location>, error: InvalidRecord| findings.push(Finding { locations, error });

        for (index, m) in dataset.matches.iter().enumerate() {
            if let Err(err) = m.validate() {
                push(vec![Location::Match(index)], err.into());
            }
        }
        for (index, err) in duplicate_matches(&dataset.matches) {
            push(vec![Location::Match(index)], err.into());
        }

        for (index, err) in duplicate_player_seasons(&dataset.players) {
            push(vec![Location::PlayerSeason(index)], err.into());
        }

        for (index, record) in dataset.teams.iter().enumerate() {
            if let Err(err) = record.validate() {
                push(vec![Location::TeamSeason(index)], err.into());
            }
        }
        for (index, err) in duplicate_team_seasons(&dataset.teams) {
            push(vec![Location::TeamSeason(index)], err.into());
        }
        for (indexes, err) in SingleChampionAssertion::check(&dataset.teams) {
            push(indexes.into_iter().map(Location::TeamSeason).collect(), err.into());
        }

        Self { findings }
    }
}

fn partition<T>(
    records: Vec<T>,
    errors: &FxHashMap<Location, InvalidRecord>,
    flagged: &mut Vec<Flagged>,
    locate: impl Fn(usize) -> Location,
    wrap: impl Fn(T) -> FlaggedRecord,
) -> Vec<T> {
    let mut admitted = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match errors.get(&locate(index)) {
            None => admitted.push(record),
            Some(error) => flagged.push(Flagged {
                record: wrap(record),
                error: error.clone(),
            }),
        }
    }
    admitted
}
