//! A single entry point for every derived view: the caller names the analysis it wants, along with
//! the season and team it is interested in, and receives the matching outcome.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter, EnumString};
use thiserror::Error;
use tracing::debug;

use crate::aggregate::{
    average_wins, champion, champion_years, champions_timeline, championship_tally, leaderboard, margin_trend,
    most_wins, season_overview, standings, team_history, team_results, top_batsmen, top_bowlers,
    toss_decision_trend, toss_impact, toss_impact_by_season, win_percentage_grid, win_type_by_season,
    win_type_split, AverageWins, Champion, ChampionSeason, HistoryEntry, MarginKind, MarginSummary, MatchResult,
    MostWins, Order, PlayerSort, SeasonOverview, SeasonTossImpact, SeasonWinTypes, StandingsRow, SuspendedSeasons,
    TitleCount, TossDecisionSummary, TossImpact, WinPercentageGrid, WinTypeSplit, TOP_PLAYERS,
};
use crate::domain::{Match, PlayerSeasonStat, Role, Season, TeamSeasonRecord};
use crate::eligibility::SuspensionConfig;
use crate::filter::{filter, filter_all_seasons, TeamFilter};
use crate::store::{Dataset, RecordStore, RejectedDataset};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Analysis {
    SeasonOverview,
    Standings,
    Champion,
    MostWins,
    WinTypeSplit,
    TossImpact,
    MarginTrend(MarginKind),
    TossDecisionTrend,
    TossImpactTrend,
    WinTypeTrend,
    TeamHistory(SuspendedSeasons),
    ChampionshipTally,
    ChampionsTimeline,
    AverageWins,
    WinPercentageGrid,
    TeamResults,
    Players {
        role: Option<Role>,
        sort: PlayerSort,
        order: Order,
        limit: Option<usize>,
    },
    TopPlayers {
        limit: usize,
    },
}
impl Analysis {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            Analysis::SeasonOverview => AnalysisKind::SeasonOverview,
            Analysis::Standings => AnalysisKind::Standings,
            Analysis::Champion => AnalysisKind::Champion,
            Analysis::MostWins => AnalysisKind::MostWins,
            Analysis::WinTypeSplit => AnalysisKind::WinTypeSplit,
            Analysis::TossImpact => AnalysisKind::TossImpact,
            Analysis::MarginTrend(_) => AnalysisKind::MarginTrend,
            Analysis::TossDecisionTrend => AnalysisKind::TossDecisionTrend,
            Analysis::TossImpactTrend => AnalysisKind::TossImpactTrend,
            Analysis::WinTypeTrend => AnalysisKind::WinTypeTrend,
            Analysis::TeamHistory(_) => AnalysisKind::TeamHistory,
            Analysis::ChampionshipTally => AnalysisKind::ChampionshipTally,
            Analysis::ChampionsTimeline => AnalysisKind::ChampionsTimeline,
            Analysis::AverageWins => AnalysisKind::AverageWins,
            Analysis::WinPercentageGrid => AnalysisKind::WinPercentageGrid,
            Analysis::TeamResults => AnalysisKind::TeamResults,
            Analysis::Players { .. } => AnalysisKind::Players,
            Analysis::TopPlayers { .. } => AnalysisKind::TopPlayers,
        }
    }
}

/// The analyses by name, without their parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AnalysisKind {
    SeasonOverview,
    Standings,
    Champion,
    MostWins,
    WinTypeSplit,
    TossImpact,
    MarginTrend,
    TossDecisionTrend,
    TossImpactTrend,
    WinTypeTrend,
    TeamHistory,
    ChampionshipTally,
    ChampionsTimeline,
    AverageWins,
    WinPercentageGrid,
    TeamResults,
    Players,
    TopPlayers,
}
impl AnalysisKind {
    /// The analysis of this kind with its parameters at their defaults.
    pub fn analysis(self) -> Analysis {
        match self {
            AnalysisKind::SeasonOverview => Analysis::SeasonOverview,
            AnalysisKind::Standings => Analysis::Standings,
            AnalysisKind::Champion => Analysis::Champion,
            AnalysisKind::MostWins => Analysis::MostWins,
            AnalysisKind::WinTypeSplit => Analysis::WinTypeSplit,
            AnalysisKind::TossImpact => Analysis::TossImpact,
            AnalysisKind::MarginTrend => Analysis::MarginTrend(MarginKind::Runs),
            AnalysisKind::TossDecisionTrend => Analysis::TossDecisionTrend,
            AnalysisKind::TossImpactTrend => Analysis::TossImpactTrend,
            AnalysisKind::WinTypeTrend => Analysis::WinTypeTrend,
            AnalysisKind::TeamHistory => Analysis::TeamHistory(SuspendedSeasons::Include),
            AnalysisKind::ChampionshipTally => Analysis::ChampionshipTally,
            AnalysisKind::ChampionsTimeline => Analysis::ChampionsTimeline,
            AnalysisKind::AverageWins => Analysis::AverageWins,
            AnalysisKind::WinPercentageGrid => Analysis::WinPercentageGrid,
            AnalysisKind::TeamResults => Analysis::TeamResults,
            AnalysisKind::Players => Analysis::Players {
                role: None,
                sort: PlayerSort::Runs,
                order: Order::Descending,
                limit: None,
            },
            AnalysisKind::TopPlayers => Analysis::TopPlayers { limit: TOP_PLAYERS },
        }
    }

    pub fn requires_team(&self) -> bool {
        matches!(self, AnalysisKind::TeamHistory | AnalysisKind::TeamResults)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub season: Season,
    pub team: TeamFilter,
    pub analysis: Analysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    SeasonOverview(SeasonOverview),
    Standings(Vec<StandingsRow>),
    Champion(Champion),
    MostWins(Option<MostWins>),
    WinTypeSplit(WinTypeSplit),
    TossImpact(TossImpact),
    MarginTrend(MarginKind, Vec<MarginSummary>),
    TossDecisionTrend(Vec<TossDecisionSummary>),
    TossImpactTrend(Vec<SeasonTossImpact>),
    WinTypeTrend(Vec<SeasonWinTypes>),
    TeamHistory {
        team: String,
        history: Vec<HistoryEntry>,
        titles: Vec<Season>,
    },
    ChampionshipTally(Vec<TitleCount>),
    ChampionsTimeline(Vec<ChampionSeason>),
    AverageWins(Vec<AverageWins>),
    WinPercentageGrid(WinPercentageGrid),
    TeamResults {
        team: String,
        results: Vec<MatchResult>,
    },
    Players(Vec<PlayerSeasonStat>),
    TopPlayers {
        batsmen: Vec<PlayerSeasonStat>,
        bowlers: Vec<PlayerSeasonStat>,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("the {0} analysis needs a team, not all teams")]
    TeamRequired(AnalysisKind),

    #[error("{0}")]
    InvalidRecords(#[from] RejectedDataset),
}

/// Runs the query against a store, whose records have already been validated.
pub fn run(store: &RecordStore, config: &SuspensionConfig, query: &Query) -> Result<Outcome, QueryError> {
    Streams {
        matches: store.matches(),
        players: store.players(),
        teams: store.teams(),
    }
    .evaluate(config, query)
}

/// Runs the query against caller-supplied records, which are validated first. Any invariant
/// violation fails the query rather than producing a misleading figure.
pub fn run_on(dataset: &Dataset, config: &SuspensionConfig, query: &Query) -> Result<Outcome, QueryError> {
    let errors = dataset.validate();
    if !errors.is_empty() {
        return Err(RejectedDataset { errors }.into());
    }
    Streams {
        matches: &dataset.matches,
        players: &dataset.players,
        teams: &dataset.teams,
    }
    .evaluate(config, query)
}

struct Streams<'a> {
    matches: &'a [Match],
    players: &'a [PlayerSeasonStat],
    teams: &'a [TeamSeasonRecord],
}
impl Streams<'_> {
    fn evaluate(&self, config: &SuspensionConfig, query: &Query) -> Result<Outcome, QueryError> {
        let kind = query.analysis.kind();
        debug!("running {kind} for season {} and {}", query.season, query.team);
        let season = query.season;
        let team = &query.team;

        let outcome = match &query.analysis {
            Analysis::SeasonOverview => {
                Outcome::SeasonOverview(season_overview(season, self.matches, self.teams, config))
            }
            Analysis::Standings => Outcome::Standings(standings(&self.active_records(config, season, team))),
            Analysis::Champion => Outcome::Champion(champion(season, &self.eligible_records(config))),
            Analysis::MostWins => Outcome::MostWins(most_wins(&self.active_records(config, season, team))),
            Analysis::WinTypeSplit => Outcome::WinTypeSplit(win_type_split(&filter(self.matches, season, team))),
            Analysis::TossImpact => Outcome::TossImpact(toss_impact(&filter(self.matches, season, team))),
            Analysis::MarginTrend(margin_kind) => Outcome::MarginTrend(
                *margin_kind,
                margin_trend(&filter_all_seasons(self.matches, team), *margin_kind),
            ),
            Analysis::TossDecisionTrend => {
                Outcome::TossDecisionTrend(toss_decision_trend(&filter_all_seasons(self.matches, team)))
            }
            Analysis::TossImpactTrend => {
                Outcome::TossImpactTrend(toss_impact_by_season(&filter_all_seasons(self.matches, team)))
            }
            Analysis::WinTypeTrend => {
                Outcome::WinTypeTrend(win_type_by_season(&filter_all_seasons(self.matches, team)))
            }
            Analysis::TeamHistory(suspended_seasons) => {
                let name = team.as_team().ok_or(QueryError::TeamRequired(kind))?;
                Outcome::TeamHistory {
                    team: name.to_string(),
                    history: team_history(name, self.teams, *suspended_seasons),
                    titles: champion_years(name, &self.eligible_records(config)),
                }
            }
            Analysis::ChampionshipTally => {
                Outcome::ChampionshipTally(championship_tally(&self.eligible_records(config)))
            }
            Analysis::ChampionsTimeline => {
                Outcome::ChampionsTimeline(champions_timeline(&self.eligible_records(config)))
            }
            Analysis::AverageWins => Outcome::AverageWins(average_wins(&self.competing_records(config, team))),
            Analysis::WinPercentageGrid => {
                Outcome::WinPercentageGrid(win_percentage_grid(&self.competing_records(config, team)))
            }
            Analysis::TeamResults => {
                let name = team.as_team().ok_or(QueryError::TeamRequired(kind))?;
                Outcome::TeamResults {
                    team: name.to_string(),
                    results: team_results(name, &filter(self.matches, season, team)),
                }
            }
            Analysis::Players {
                role,
                sort,
                order,
                limit,
            } => {
                let mut players = leaderboard(&filter(self.players, season, team), *role, *sort, *order);
                if let Some(limit) = limit {
                    players.truncate(*limit);
                }
                Outcome::Players(players)
            }
            Analysis::TopPlayers { limit } => {
                let players = filter(self.players, season, team);
                Outcome::TopPlayers {
                    batsmen: top_batsmen(&players, *limit),
                    bowlers: top_bowlers(&players, *limit),
                }
            }
        };
        Ok(outcome)
    }

    /// Records of `season` admitted by the team filter and eligible for competitive rankings.
    fn active_records(&self, config: &SuspensionConfig, season: Season, team: &TeamFilter) -> Vec<&TeamSeasonRecord> {
        filter(self.teams, season, team)
            .into_iter()
            .filter(|record| !config.excludes(record))
            .collect()
    }

    /// Records of every season and team, less the suspended ones. Title lookups run over these, so
    /// that a suspended team never holds a title whatever its record says.
    fn eligible_records(&self, config: &SuspensionConfig) -> Vec<&TeamSeasonRecord> {
        self.teams.iter().filter(|record| !config.excludes(record)).collect()
    }

    /// Records of every season admitted by the team filter, less the suspended ones.
    fn competing_records(&self, config: &SuspensionConfig, team: &TeamFilter) -> Vec<&TeamSeasonRecord> {
        filter_all_seasons(self.teams, team)
            .into_iter()
            .filter(|record| !config.excludes(record))
            .collect()
    }
}
