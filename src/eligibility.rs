//! Suspension status of teams, and the active subset of a season that competitive rankings are
//! drawn from.
//!
//! Suspensions are configured, not inferred from results. A team is treated as suspended in a
//! season if either the configuration names it or its own record carries the suspended flag.

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Season, TeamIdentity, TeamSeasonRecord};

/// Mapping of season to the names of the teams barred from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionConfig {
    #[serde(default)]
    pub suspensions: BTreeMap<Season, BTreeSet<String>>,
}
impl SuspensionConfig {
    /// No team is suspended in any season.
    pub fn none() -> Self {
        Self {
            suspensions: BTreeMap::new(),
        }
    }

    pub fn with_suspension(mut self, season: Season, team: impl Into<String>) -> Self {
        self.suspensions.entry(season).or_default().insert(team.into());
        self
    }

    /// Names of the teams suspended in `season`, in name order.
    pub fn suspended_teams(&self, season: Season) -> Vec<&str> {
        self.suspensions
            .get(&season)
            .map(|teams| teams.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_suspended(&self, season: Season, team: &str) -> bool {
        self.suspensions
            .get(&season)
            .map(|teams| teams.contains(team))
            .unwrap_or(false)
    }

    /// Whether a team-season record is barred from competitive rankings.
    pub fn excludes(&self, record: &TeamSeasonRecord) -> bool {
        record.suspended || self.is_suspended(record.season, record.name())
    }

    /// Every team present in `season`, including suspended ones, marked accordingly and ordered
    /// by name.
    pub fn roster<R: Borrow<TeamSeasonRecord>>(&self, season: Season, records: &[R]) -> Vec<RosterEntry> {
        let mut roster: Vec<RosterEntry> = vec![];
        for record in records.iter().map(Borrow::borrow) {
            if record.season != season {
                continue;
            }
            let suspended = self.excludes(record);
            match roster.iter_mut().find(|entry| entry.team.name == record.team.name) {
                Some(entry) => entry.suspended |= suspended,
                None => roster.push(RosterEntry {
                    team: record.team.clone(),
                    suspended,
                }),
            }
        }
        roster.sort_by(|a, b| a.team.name.cmp(&b.team.name));
        roster
    }

    /// Names of the teams present in `season` less the suspended ones, ordered by name.
    pub fn active_teams<R: Borrow<TeamSeasonRecord>>(&self, season: Season, records: &[R]) -> Vec<String> {
        self.roster(season, records)
            .into_iter()
            .filter(|entry| !entry.suspended)
            .map(|entry| entry.team.name)
            .collect()
    }

    /// Records of `season` that are eligible for competitive rankings, in input order.
    pub fn active_records<'a, R: Borrow<TeamSeasonRecord>>(
        &self,
        season: Season,
        records: &'a [R],
    ) -> Vec<&'a TeamSeasonRecord> {
        records
            .iter()
            .map(Borrow::borrow)
            .filter(|record| record.season == season && !self.excludes(record))
            .collect()
    }
}

impl Default for SuspensionConfig {
    /// The 2016 and 2017 suspensions of Chennai Super Kings and Rajasthan Royals.
    fn default() -> Self {
        let mut config = Self::none();
        for season in [2016, 2017] {
            config = config
                .with_suspension(season, "Chennai Super Kings")
                .with_suspension(season, "Rajasthan Royals");
        }
        config
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub team: TeamIdentity,
    pub suspended: bool,
}
