//! Stateless, deterministic queries over the record streams. Every function takes shared slices
//! (of records or of references to records) and returns a freshly computed, owned result. None of
//! them fails on empty input: "no data" is reported as an empty collection or an absent value.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::domain::{Match, Season, TeamSeasonRecord};
use crate::eligibility::SuspensionConfig;

pub mod history;
pub mod margin;
pub mod players;
pub mod results;
pub mod standings;
pub mod toss;
pub mod win_type;

pub use history::*;
pub use margin::*;
pub use players::*;
pub use results::*;
pub use standings::*;
pub use toss::*;
pub use win_type::*;


/// The headline facts of one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonOverview {
    pub season: Season,
    pub matches: usize,
    pub active_teams: usize,
    pub champion: Champion,
    pub most_wins: Option<MostWins>,
    pub suspended: Vec<String>,
}

/// Summarises `season` from its matches and team records. Suspended teams count towards neither
/// the active teams, the champion nor the most-wins leader, but are listed by name.
pub fn season_overview<M, R>(
    season: Season,
    matches: &[M],
    records: &[R],
    config: &SuspensionConfig,
) -> SeasonOverview
where
    M: Borrow<Match>,
    R: Borrow<TeamSeasonRecord>,
{
    let roster = config.roster(season, records);
    let active = config.active_records(season, records);
    SeasonOverview {
        season,
        matches: matches
            .iter()
            .map(Borrow::borrow)
            .filter(|m: &&Match| m.season == season)
            .count(),
        active_teams: roster.iter().filter(|entry| !entry.suspended).count(),
        champion: champion(season, &active),
        most_wins: most_wins(&active),
        suspended: roster
            .into_iter()
            .filter(|entry| entry.suspended)
            .map(|entry| entry.team.name)
            .collect(),
    }
}
