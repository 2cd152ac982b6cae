use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::domain::{Margin, Match};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Verdict {
    Won,
    Lost,
    #[strum(to_string = "No result")]
    NoResult,
}

/// A match from the point of view of one of its sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: u32,
    pub date: NaiveDate,
    pub opponent: String,
    pub verdict: Verdict,
    pub margin: Option<Margin>,
    pub venue: String,
}
impl MatchResult {
    /// Human-readable summary, such as "Won by 23 runs" or "Lost".
    pub fn detail(&self) -> MatchResultDetail {
        MatchResultDetail(self)
    }
}

/// Renders the verdict followed by the match's margin, if it has one. The margin is whichever of
/// the runs or wickets margins is positive, and it is reported to both sides regardless of which
/// side batted in the deciding innings: the loser of a match won by 27 runs reads "Lost by 27
/// runs", not a bare "Lost". A bare verdict only appears when neither margin is positive.
pub struct MatchResultDetail<'a>(&'a MatchResult);

impl Display for MatchResultDetail<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let result = self.0;
        match (result.verdict, result.margin) {
            (Verdict::NoResult, _) => write!(f, "{}", Verdict::NoResult),
            (verdict, Some(margin)) => write!(f, "{verdict} by {margin}"),
            (verdict, None) => write!(f, "{verdict}"),
        }
    }
}

/// The match log of `team`, in input order. Matches it did not play in are skipped.
pub fn team_results<M: Borrow<Match>>(team: &str, matches: &[M]) -> Vec<MatchResult> {
    matches
        .iter()
        .map(Borrow::borrow)
        .filter_map(|m| {
            let opponent = m.opponent_of(team)?;
            let verdict = match &m.winner {
                None => Verdict::NoResult,
                Some(winner) if winner == team => Verdict::Won,
                Some(_) => Verdict::Lost,
            };
            Some(MatchResult {
                match_id: m.id,
                date: m.date,
                opponent: opponent.to_string(),
                verdict,
                margin: m.margin(),
                venue: m.venue.clone(),
            })
        })
        .collect()
}
