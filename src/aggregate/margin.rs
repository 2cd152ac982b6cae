use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::aggregate::win_type::group_by_season;
use crate::domain::{Match, Season};
use crate::stats::{round2, SliceExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MarginKind {
    Runs,
    Wickets,
}
impl MarginKind {
    fn margin_of(&self, m: &Match) -> u32 {
        match self {
            MarginKind::Runs => m.win_by_runs,
            MarginKind::Wickets => m.win_by_wickets,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginSummary {
    pub season: Season,
    pub matches: usize,
    pub mean: f64,
    pub median: f64,
    pub max: u32,
}

/// Per-season mean, median and maximum of the winning margin of the given kind, over the matches
/// won that way. Seasons without such a match are omitted rather than zero-filled.
pub fn margin_trend<M: Borrow<Match>>(matches: &[M], kind: MarginKind) -> Vec<MarginSummary> {
    group_by_season(matches)
        .into_iter()
        .filter_map(|(season, matches)| {
            let margins: Vec<u32> = matches
                .iter()
                .map(|m| kind.margin_of(m))
                .filter(|&margin| margin > 0)
                .collect();
            let mean = margins.mean()?;
            let median = margins.median()?;
            let max = margins.iter().copied().max()?;
            Some(MarginSummary {
                season,
                matches: margins.len(),
                mean: round2(mean),
                median,
                max,
            })
        })
        .collect()
}
