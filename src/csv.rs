//! Utilities for exporting derived tables as CSV files.

use std::borrow::Cow;
use std::fmt::Display;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::ops::{Index, IndexMut};
use std::path::Path;

use ordinalizer::Ordinal;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount, EnumIter};

use crate::aggregate::{
    AverageWins, ChampionSeason, HistoryEntry, MarginSummary, MatchResult, SeasonTossImpact, SeasonWinTypes,
    StandingsRow, TitleCount, TossDecisionSummary, WinPercentageGrid,
};
use crate::analysis::Outcome;
use crate::domain::PlayerSeasonStat;

pub struct CsvWriter<W: Write> {
    writer: W,
}
impl CsvWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}
impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn append<R>(&mut self, record: R) -> Result<(), io::Error>
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let mut first = true;
        for datum in record.into_iter() {
            if first {
                first = false;
            } else {
                self.writer.write_all(b",")?;
            }
            self.writer.write_all(quote(datum.as_ref()).as_bytes())?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), io::Error> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Quotes a datum if it contains a delimiter, a quote or a line break.
fn quote(datum: &str) -> Cow<str> {
    if datum.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", datum.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(datum)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    items: Vec<Cow<'static, str>>,
}
impl Record {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut items = Vec::with_capacity(capacity);
        items.resize_with(capacity, || Cow::Borrowed(""));
        Self { items }
    }

    pub fn with_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let items = values
            .into_iter()
            .map(|value| Cow::Owned(value.to_string()))
            .collect();
        Self { items }
    }

    pub fn set(&mut self, ordinal: impl Into<usize>, value: impl ToString) {
        self.items[ordinal.into()] = Cow::Owned(value.to_string())
    }

    /// Sets an optional value, leaving the cell blank if it is absent.
    pub fn set_option<D: Display>(&mut self, ordinal: impl Into<usize>, value: Option<D>) {
        if let Some(value) = value {
            self.set(ordinal, value);
        }
    }
}

impl IntoIterator for Record {
    type Item = Cow<'static, str>;
    type IntoIter = std::vec::IntoIter<Cow<'static, str>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<I: Into<usize>> Index<I> for Record {
    type Output = Cow<'static, str>;

    fn index(&self, index: I) -> &Self::Output {
        &self.items[index.into()]
    }
}

impl<I: Into<usize>> IndexMut<I> for Record {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.items[index.into()]
    }
}

/// Anything that can be laid out as a header followed by records.
pub trait Tabular {
    fn header(&self) -> Vec<String>;

    fn records(&self) -> Vec<Record>;
}

/// A row type whose columns are named by an enum.
pub trait Row {
    type Column: IntoEnumIterator + EnumCount + Display;

    fn record(&self) -> Record;
}

impl<R: Row> Tabular for [R] {
    fn header(&self) -> Vec<String> {
        R::Column::iter().map(|column| column.to_string()).collect()
    }

    fn records(&self) -> Vec<Record> {
        self.iter().map(Row::record).collect()
    }
}

pub fn write_table<W: Write>(writer: &mut CsvWriter<W>, table: &(impl Tabular + ?Sized)) -> Result<(), io::Error> {
    writer.append(table.header())?;
    for record in table.records() {
        writer.append(record)?;
    }
    writer.flush()
}

/// Writes `table` to a new CSV file at `path`.
pub fn export(path: impl AsRef<Path>, table: &(impl Tabular + ?Sized)) -> Result<(), io::Error> {
    let mut writer = CsvWriter::create(path)?;
    write_table(&mut writer, table)
}

macro_rules! ordinal_column {
    ($column:ident) => {
        impl From<$column> for usize {
            fn from(column: $column) -> Self {
                column.ordinal()
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum StandingsColumn {
    Position,
    Team,
    Code,
    Played,
    Won,
    Lost,
    Points,
    NetRunRate,
}
ordinal_column!(StandingsColumn);

impl Row for StandingsRow {
    type Column = StandingsColumn;

    fn record(&self) -> Record {
        let mut record = Record::with_capacity(StandingsColumn::COUNT);
        record.set(StandingsColumn::Position, self.position);
        record.set(StandingsColumn::Team, &self.team.name);
        record.set(StandingsColumn::Code, &self.team.code);
        record.set(StandingsColumn::Played, self.played);
        record.set(StandingsColumn::Won, self.won);
        record.set(StandingsColumn::Lost, self.lost);
        record.set(StandingsColumn::Points, self.points);
        record.set(StandingsColumn::NetRunRate, self.net_run_rate);
        record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TitleColumn {
    Team,
    Code,
    Titles,
}
ordinal_column!(TitleColumn);

impl Row for TitleCount {
    type Column = TitleColumn;

    fn record(&self) -> Record {
        let mut record = Record::with_capacity(TitleColumn::COUNT);
        record.set(TitleColumn::Team, &self.team.name);
        record.set(TitleColumn::Code, &self.team.code);
        record.set(TitleColumn::Titles, self.titles);
        record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MarginColumn {
    Season,
    Matches,
    Mean,
    Median,
    Max,
}
ordinal_column!(MarginColumn);

impl Row for MarginSummary {
    type Column = MarginColumn;

    fn record(&self) -> Record {
        let mut record = Record::with_capacity(MarginColumn::COUNT);
        record.set(MarginColumn::Season, self.season);
        record.set(MarginColumn::Matches, self.matches);
        record.set(MarginColumn::Mean, self.mean);
        record.set(MarginColumn::Median, self.median);
        record.set(MarginColumn::Max, self.max);
        record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TossDecisionColumn {
    Season,
    Matches,
    Bat,
    Field,
    BatPct,
    FieldPct,
    WonAfterBattingPct,
    WonAfterFieldingPct,
}
ordinal_column!(TossDecisionColumn);

impl Row for TossDecisionSummary {
    type Column = TossDecisionColumn;

    fn record(&self) -> Record {
        let mut record = Record::with_capacity(TossDecisionColumn::COUNT);
        record.set(TossDecisionColumn::Season, self.season);
        record.set(TossDecisionColumn::Matches, self.matches);
        record.set(TossDecisionColumn::Bat, self.bat);
        record.set(TossDecisionColumn::Field, self.field);
        record.set_option(TossDecisionColumn::BatPct, self.bat_pct);
        record.set_option(TossDecisionColumn::FieldPct, self.field_pct);
        record.set_option(TossDecisionColumn::WonAfterBattingPct, self.won_after_batting_pct);
        record.set_option(TossDecisionColumn::WonAfterFieldingPct, self.won_after_fielding_pct);
        record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum WinTypeColumn {
    Season,
    Matches,
    ByRuns,
    ByWickets,
    ByRunsPct,
    ByWicketsPct,
}
ordinal_column!(WinTypeColumn);

impl Row for SeasonWinTypes {
    type Column = WinTypeColumn;

    fn record(&self) -> Record {
        let mut record = Record::with_capacity(WinTypeColumn::COUNT);
        record.set(WinTypeColumn::Season, self.season);
        record.set(WinTypeColumn::Matches, self.split.matches);
        record.set(WinTypeColumn::ByRuns, self.split.by_runs);
        record.set(WinTypeColumn::ByWickets, self.split.by_wickets);
        record.set_option(WinTypeColumn::ByRunsPct, self.split.by_runs_pct);
        record.set_option(WinTypeColumn::ByWicketsPct, self.split.by_wickets_pct);
        record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TossImpactColumn {
    Season,
    Matches,
    TossWinnerWon,
    TossWinnerLost,
    WonPct,
}
ordinal_column!(TossImpactColumn);

impl Row for SeasonTossImpact {
    type Column = TossImpactColumn;

    fn record(&self) -> Record {
        let mut record = Record::with_capacity(TossImpactColumn::COUNT);
        record.set(TossImpactColumn::Season, self.season);
        record.set(TossImpactColumn::Matches, self.impact.matches);
        record.set(TossImpactColumn::TossWinnerWon, self.impact.toss_winner_won);
        record.set(TossImpactColumn::TossWinnerLost, self.impact.toss_winner_lost);
        record.set_option(TossImpactColumn::WonPct, self.impact.won_pct);
        record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum HistoryColumn {
    Season,
    Played,
    Wins,
    Losses,
    Points,
    NetRunRate,
    WinPct,
    TitleWinner,
    Suspended,
}
ordinal_column!(HistoryColumn);

impl Row for HistoryEntry {
    type Column = HistoryColumn;

    fn record(&self) -> Record {
        let mut record = Record::with_capacity(HistoryColumn::COUNT);
        record.set(HistoryColumn::Season, self.record.season);
        record.set(HistoryColumn::Played, self.record.matches_played);
        record.set(HistoryColumn::Wins, self.record.wins);
        record.set(HistoryColumn::Losses, self.record.losses);
        record.set(HistoryColumn::Points, self.record.points);
        record.set(HistoryColumn::NetRunRate, self.record.net_run_rate);
        record.set_option(HistoryColumn::WinPct, self.win_pct);
        record.set(HistoryColumn::TitleWinner, self.record.title_winner);
        record.set(HistoryColumn::Suspended, self.record.suspended);
        record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TimelineColumn {
    Season,
    Team,
    Code,
    Wins,
    Losses,
    WinPct,
    NetRunRate,
}
ordinal_column!(TimelineColumn);

impl Row for ChampionSeason {
    type Column = TimelineColumn;

    fn record(&self) -> Record {
        let mut record = Record::with_capacity(TimelineColumn::COUNT);
        record.set(TimelineColumn::Season, self.season);
        record.set(TimelineColumn::Team, &self.team.name);
        record.set(TimelineColumn::Code, &self.team.code);
        record.set(TimelineColumn::Wins, self.wins);
        record.set(TimelineColumn::Losses, self.losses);
        record.set_option(TimelineColumn::WinPct, self.win_pct);
        record.set(TimelineColumn::NetRunRate, self.net_run_rate);
        record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AverageWinsColumn {
    Team,
    Code,
    Seasons,
    AverageWins,
}
ordinal_column!(AverageWinsColumn);

impl Row for AverageWins {
    type Column = AverageWinsColumn;

    fn record(&self) -> Record {
        let mut record = Record::with_capacity(AverageWinsColumn::COUNT);
        record.set(AverageWinsColumn::Team, &self.team.name);
        record.set(AverageWinsColumn::Code, &self.team.code);
        record.set(AverageWinsColumn::Seasons, self.seasons);
        record.set(AverageWinsColumn::AverageWins, self.average_wins);
        record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ResultColumn {
    MatchId,
    Date,
    Opponent,
    Result,
    Detail,
    Venue,
}
ordinal_column!(ResultColumn);

impl Row for MatchResult {
    type Column = ResultColumn;

    fn record(&self) -> Record {
        let mut record = Record::with_capacity(ResultColumn::COUNT);
        record.set(ResultColumn::MatchId, self.match_id);
        record.set(ResultColumn::Date, self.date);
        record.set(ResultColumn::Opponent, &self.opponent);
        record.set(ResultColumn::Result, &self.verdict);
        record.set(ResultColumn::Detail, self.detail());
        record.set(ResultColumn::Venue, &self.venue);
        record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PlayerColumn {
    PlayerId,
    PlayerName,
    Team,
    Season,
    Role,
    Matches,
    Runs,
    Average,
    StrikeRate,
    Fifties,
    Hundreds,
    Wickets,
    Economy,
}
ordinal_column!(PlayerColumn);

impl Row for PlayerSeasonStat {
    type Column = PlayerColumn;

    fn record(&self) -> Record {
        let mut record = Record::with_capacity(PlayerColumn::COUNT);
        record.set(PlayerColumn::PlayerId, self.player_id);
        record.set(PlayerColumn::PlayerName, &self.player_name);
        record.set(PlayerColumn::Team, &self.team);
        record.set(PlayerColumn::Season, self.season);
        record.set(PlayerColumn::Role, self.role);
        record.set(PlayerColumn::Matches, self.matches);
        record.set(PlayerColumn::Runs, self.runs);
        record.set(PlayerColumn::Average, format!("{:.2}", self.average));
        record.set(PlayerColumn::StrikeRate, format!("{:.2}", self.strike_rate));
        record.set(PlayerColumn::Fifties, self.fifties);
        record.set(PlayerColumn::Hundreds, self.hundreds);
        record.set(PlayerColumn::Wickets, self.wickets);
        record.set(PlayerColumn::Economy, format!("{:.2}", self.economy));
        record
    }
}

impl Tabular for WinPercentageGrid {
    fn header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.seasons.len() + 1);
        header.push("team".to_string());
        header.extend(self.seasons.iter().map(ToString::to_string));
        header
    }

    fn records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = Record::with_capacity(self.seasons.len() + 1);
                record.set(0usize, &row.team.name);
                for (column, win_pct) in row.win_pcts.iter().enumerate() {
                    record.set_option(column + 1, *win_pct);
                }
                record
            })
            .collect()
    }
}

/// Metric-value pairs, for outcomes that are a handful of figures rather than a list of rows.
struct Summary(Vec<(&'static str, String)>);

impl Tabular for Summary {
    fn header(&self) -> Vec<String> {
        vec!["metric".to_string(), "value".to_string()]
    }

    fn records(&self) -> Vec<Record> {
        self.0
            .iter()
            .map(|(metric, value)| Record::with_values([metric.to_string(), value.clone()]))
            .collect()
    }
}

fn optional<D: Display>(value: Option<D>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

impl Outcome {
    fn table(&self) -> Box<dyn Tabular + '_> {
        match self {
            Outcome::SeasonOverview(overview) => Box::new(Summary(vec![
                ("season", overview.season.to_string()),
                ("matches", overview.matches.to_string()),
                ("active_teams", overview.active_teams.to_string()),
                ("champion", optional(overview.champion.team().map(|team| &team.name))),
                ("most_wins_team", optional(overview.most_wins.as_ref().map(|most| &most.team.name))),
                ("most_wins", optional(overview.most_wins.as_ref().map(|most| most.wins))),
                ("suspended", overview.suspended.join("; ")),
            ])),
            Outcome::Champion(champion) => {
                Box::new(Summary(vec![("champion", optional(champion.team().map(|team| &team.name)))]))
            }
            Outcome::MostWins(most_wins) => Box::new(Summary(vec![
                ("team", optional(most_wins.as_ref().map(|most| &most.team.name))),
                ("wins", optional(most_wins.as_ref().map(|most| most.wins))),
            ])),
            Outcome::WinTypeSplit(split) => Box::new(Summary(vec![
                ("matches", split.matches.to_string()),
                ("by_runs", split.by_runs.to_string()),
                ("by_wickets", split.by_wickets.to_string()),
                ("by_runs_pct", optional(split.by_runs_pct)),
                ("by_wickets_pct", optional(split.by_wickets_pct)),
            ])),
            Outcome::TossImpact(impact) => Box::new(Summary(vec![
                ("matches", impact.matches.to_string()),
                ("toss_winner_won", impact.toss_winner_won.to_string()),
                ("toss_winner_lost", impact.toss_winner_lost.to_string()),
                ("won_pct", optional(impact.won_pct)),
            ])),
            Outcome::Standings(rows) => Box::new(rows.as_slice()),
            Outcome::MarginTrend(_, trend) => Box::new(trend.as_slice()),
            Outcome::TossDecisionTrend(trend) => Box::new(trend.as_slice()),
            Outcome::TossImpactTrend(trend) => Box::new(trend.as_slice()),
            Outcome::WinTypeTrend(trend) => Box::new(trend.as_slice()),
            Outcome::TeamHistory { history, .. } => Box::new(history.as_slice()),
            Outcome::ChampionshipTally(tally) => Box::new(tally.as_slice()),
            Outcome::ChampionsTimeline(timeline) => Box::new(timeline.as_slice()),
            Outcome::AverageWins(averages) => Box::new(averages.as_slice()),
            Outcome::WinPercentageGrid(grid) => Box::new(grid),
            Outcome::TeamResults { results, .. } => Box::new(results.as_slice()),
            Outcome::Players(players) => Box::new(players.as_slice()),
            Outcome::TopPlayers { batsmen, bowlers } => {
                let players = batsmen.iter().chain(bowlers).cloned().collect::<Vec<_>>();
                Box::new(Owned(players))
            }
        }
    }
}

impl Tabular for Outcome {
    fn header(&self) -> Vec<String> {
        self.table().header()
    }

    fn records(&self) -> Vec<Record> {
        self.table().records()
    }
}

impl<T: Tabular + ?Sized> Tabular for &T {
    fn header(&self) -> Vec<String> {
        (**self).header()
    }

    fn records(&self) -> Vec<Record> {
        (**self).records()
    }
}

struct Owned<R>(Vec<R>);

impl<R: Row> Tabular for Owned<R> {
    fn header(&self) -> Vec<String> {
        self.0.as_slice().header()
    }

    fn records(&self) -> Vec<Record> {
        self.0.as_slice().records()
    }
}
