use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::aggregate::win_type::group_by_season;
use crate::domain::{Match, Season, TossDecision};
use crate::stats::percentage;

/// How often the side that won the toss went on to win the match. A match the toss winner did not
/// win, including a no-result, counts against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TossImpact {
    pub matches: usize,
    pub toss_winner_won: usize,
    pub toss_winner_lost: usize,
    pub won_pct: Option<f64>,
}
impl TossImpact {
    fn tally<'a>(matches: impl Iterator<Item = &'a Match>) -> Self {
        let (mut total, mut won) = (0, 0);
        for m in matches {
            total += 1;
            if m.toss_winner_won() {
                won += 1;
            }
        }
        Self {
            matches: total,
            toss_winner_won: won,
            toss_winner_lost: total - won,
            won_pct: percentage(won, total),
        }
    }
}

pub fn toss_impact<M: Borrow<Match>>(matches: &[M]) -> TossImpact {
    TossImpact::tally(matches.iter().map(Borrow::borrow))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonTossImpact {
    pub season: Season,
    pub impact: TossImpact,
}

pub fn toss_impact_by_season<M: Borrow<Match>>(matches: &[M]) -> Vec<SeasonTossImpact> {
    group_by_season(matches)
        .into_iter()
        .map(|(season, matches)| SeasonTossImpact {
            season,
            impact: TossImpact::tally(matches.into_iter()),
        })
        .collect()
}

/// What toss winners chose in a season, and how each choice fared. Every percentage is undefined
/// on its own when its denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TossDecisionSummary {
    pub season: Season,
    pub matches: usize,
    pub bat: usize,
    pub field: usize,
    pub bat_pct: Option<f64>,
    pub field_pct: Option<f64>,
    pub won_after_batting_pct: Option<f64>,
    pub won_after_fielding_pct: Option<f64>,
}

pub fn toss_decision_trend<M: Borrow<Match>>(matches: &[M]) -> Vec<TossDecisionSummary> {
    group_by_season(matches)
        .into_iter()
        .map(|(season, matches)| {
            let (mut bat, mut field, mut won_after_batting, mut won_after_fielding) = (0, 0, 0, 0);
            for m in &matches {
                let won = m.toss_winner_won();
                match m.toss_decision {
                    TossDecision::Bat => {
                        bat += 1;
                        won_after_batting += usize::from(won);
                    }
                    TossDecision::Field => {
                        field += 1;
                        won_after_fielding += usize::from(won);
                    }
                }
            }
            let total = matches.len();
            TossDecisionSummary {
                season,
                matches: total,
                bat,
                field,
                bat_pct: percentage(bat, total),
                field_pct: percentage(field, total),
                won_after_batting_pct: percentage(won_after_batting, bat),
                won_after_fielding_pct: percentage(won_after_fielding, field),
            }
        })
        .collect()
}
