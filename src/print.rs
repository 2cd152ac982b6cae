//! Console tables for every analysis outcome.

use std::fmt::Display;

use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Cell, Col, Row, Table};

use crate::aggregate::{
    AverageWins, ChampionSeason, HistoryEntry, MarginKind, MarginSummary, MatchResult, SeasonOverview,
    SeasonTossImpact, SeasonWinTypes, StandingsRow, TitleCount, TossDecisionSummary, TossImpact, WinPercentageGrid,
    WinTypeSplit,
};
use crate::analysis::Outcome;
use crate::display::{DisplayOption, DisplayPercent, DisplaySlice};
use crate::domain::{PlayerSeasonStat, Season};

fn left(value: impl Display) -> Cell {
    Cell::new(Styles::default(), value.to_string().into())
}

fn right(value: impl Display) -> Cell {
    Cell::new(Styles::default().with(HAlign::Right), value.to_string().into())
}

fn with_header(widths: &[usize], headings: &[&str]) -> Table {
    Table::default()
        .with_cols(
            widths
                .iter()
                .map(|&width| Col::new(Styles::default().with(MinWidth(width))))
                .collect(),
        )
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            headings.iter().map(|&heading| heading.into()).collect(),
        ))
}

pub fn tabulate_standings(rows: &[StandingsRow]) -> Table {
    let mut table = with_header(
        &[4, 30, 6, 6, 6, 6, 6, 8],
        &["Pos", "Team", "Code", "P", "W", "L", "Pts", "NRR"],
    );
    table.push_rows(rows.iter().map(|row| {
        Row::new(
            Styles::default(),
            vec![
                right(row.position),
                left(&row.team.name),
                left(&row.team.code),
                right(row.played),
                right(row.won),
                right(row.lost),
                right(row.points),
                right(format!("{:+.2}", row.net_run_rate)),
            ],
        )
    }));
    table
}

/// A two-column table of labelled figures.
fn tabulate_figures(figures: Vec<(&str, String)>) -> Table {
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(20))),
        Col::new(Styles::default().with(MinWidth(30)).with(HAlign::Right)),
    ]);
    table.push_rows(
        figures
            .into_iter()
            .map(|(label, value)| Row::new(Styles::default(), vec![left(label), value.into()])),
    );
    table
}

pub fn tabulate_overview(overview: &SeasonOverview) -> Table {
    tabulate_figures(vec![
        ("Season", overview.season.to_string()),
        ("Matches", overview.matches.to_string()),
        ("Active teams", overview.active_teams.to_string()),
        ("Champion", overview.champion.to_string()),
        (
            "Most wins",
            match &overview.most_wins {
                None => DisplayOption::<String>(None).to_string(),
                Some(most_wins) => format!("{} ({})", most_wins.team.name, most_wins.wins),
            },
        ),
        (
            "Suspended",
            if overview.suspended.is_empty() {
                "-".to_string()
            } else {
                overview.suspended.join(", ")
            },
        ),
    ])
}

pub fn tabulate_win_type_split(split: &WinTypeSplit) -> Table {
    tabulate_figures(vec![
        ("Decided matches", split.matches.to_string()),
        ("Won by runs", format!("{} ({})", split.by_runs, DisplayPercent(split.by_runs_pct))),
        ("Won by wickets", format!("{} ({})", split.by_wickets, DisplayPercent(split.by_wickets_pct))),
    ])
}

pub fn tabulate_toss_impact(impact: &TossImpact) -> Table {
    tabulate_figures(vec![
        ("Matches", impact.matches.to_string()),
        ("Toss winner won", impact.toss_winner_won.to_string()),
        ("Toss winner lost", impact.toss_winner_lost.to_string()),
        ("Won after toss", DisplayPercent(impact.won_pct).to_string()),
    ])
}

pub fn tabulate_margin_trend(kind: MarginKind, trend: &[MarginSummary]) -> Table {
    let mut table = with_header(&[8, 8, 10, 10, 8], &["Season", "Matches", "Mean", "Median", "Max"]);
    table.push_rows(trend.iter().map(|summary| {
        Row::new(
            Styles::default(),
            vec![
                left(summary.season),
                right(summary.matches),
                right(format!("{:.2} {kind}", summary.mean)),
                right(format!("{:.1} {kind}", summary.median)),
                right(summary.max),
            ],
        )
    }));
    table
}

pub fn tabulate_toss_decisions(trend: &[TossDecisionSummary]) -> Table {
    let mut table = with_header(
        &[8, 8, 14, 14, 16, 16],
        &["Season", "Matches", "Bat", "Field", "Won after bat", "Won after field"],
    );
    table.push_rows(trend.iter().map(|summary| {
        Row::new(
            Styles::default(),
            vec![
                left(summary.season),
                right(summary.matches),
                right(format!("{} ({})", summary.bat, DisplayPercent(summary.bat_pct))),
                right(format!("{} ({})", summary.field, DisplayPercent(summary.field_pct))),
                right(DisplayPercent(summary.won_after_batting_pct)),
                right(DisplayPercent(summary.won_after_fielding_pct)),
            ],
        )
    }));
    table
}

pub fn tabulate_toss_impacts(trend: &[SeasonTossImpact]) -> Table {
    let mut table = with_header(&[8, 8, 8, 8, 10], &["Season", "Matches", "Won", "Lost", "Won %"]);
    table.push_rows(trend.iter().map(|entry| {
        Row::new(
            Styles::default(),
            vec![
                left(entry.season),
                right(entry.impact.matches),
                right(entry.impact.toss_winner_won),
                right(entry.impact.toss_winner_lost),
                right(DisplayPercent(entry.impact.won_pct)),
            ],
        )
    }));
    table
}

pub fn tabulate_win_types(trend: &[SeasonWinTypes]) -> Table {
    let mut table = with_header(&[8, 8, 16, 16], &["Season", "Matches", "By runs", "By wickets"]);
    table.push_rows(trend.iter().map(|entry| {
        Row::new(
            Styles::default(),
            vec![
                left(entry.season),
                right(entry.split.matches),
                right(format!("{} ({})", entry.split.by_runs, DisplayPercent(entry.split.by_runs_pct))),
                right(format!("{} ({})", entry.split.by_wickets, DisplayPercent(entry.split.by_wickets_pct))),
            ],
        )
    }));
    table
}

pub fn tabulate_history(history: &[HistoryEntry]) -> Table {
    let mut table = with_header(
        &[8, 6, 6, 6, 6, 8, 10, 8],
        &["Season", "P", "W", "L", "Pts", "NRR", "Win %", "Status"],
    );
    table.push_rows(history.iter().map(|entry| {
        let record = &entry.record;
        let status = if record.suspended {
            "Suspended"
        } else if record.title_winner {
            "Champion"
        } else {
            ""
        };
        Row::new(
            Styles::default(),
            vec![
                left(record.season),
                right(record.matches_played),
                right(record.wins),
                right(record.losses),
                right(record.points),
                right(format!("{:+.2}", record.net_run_rate)),
                right(DisplayPercent(entry.win_pct)),
                left(status),
            ],
        )
    }));
    table
}

pub fn tabulate_tally(tally: &[TitleCount]) -> Table {
    let mut table = with_header(&[30, 6, 7], &["Team", "Code", "Titles"]);
    table.push_rows(
        tally
            .iter()
            .map(|count| Row::new(Styles::default(), vec![left(&count.team.name), left(&count.team.code), right(count.titles)])),
    );
    table
}

pub fn tabulate_timeline(timeline: &[ChampionSeason]) -> Table {
    let mut table = with_header(&[8, 30, 6, 6, 10, 8], &["Season", "Champion", "W", "L", "Win %", "NRR"]);
    table.push_rows(timeline.iter().map(|entry| {
        Row::new(
            Styles::default(),
            vec![
                left(entry.season),
                left(&entry.team.name),
                right(entry.wins),
                right(entry.losses),
                right(DisplayPercent(entry.win_pct)),
                right(format!("{:+.2}", entry.net_run_rate)),
            ],
        )
    }));
    table
}

pub fn tabulate_average_wins(averages: &[AverageWins]) -> Table {
    let mut table = with_header(&[30, 8, 8], &["Team", "Seasons", "Avg wins"]);
    table.push_rows(averages.iter().map(|average| {
        Row::new(
            Styles::default(),
            vec![
                left(&average.team.name),
                right(average.seasons),
                right(format!("{:.2}", average.average_wins)),
            ],
        )
    }));
    table
}

pub fn tabulate_grid(grid: &WinPercentageGrid) -> Table {
    let mut table = Table::default()
        .with_cols({
            let mut cols = vec![Col::new(Styles::default().with(MinWidth(30)).with(Separator(true)))];
            for _ in &grid.seasons {
                cols.push(Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)));
            }
            cols
        })
        .with_row({
            let mut header_cells = vec!["Team".into()];
            for season in &grid.seasons {
                header_cells.push(season.to_string().into());
            }
            Row::new(Styles::default().with(Header(true)), header_cells)
        });

    for row in &grid.rows {
        let mut row_cells = vec![left(&row.team.name)];
        for win_pct in &row.win_pcts {
            row_cells.push(right(DisplayPercent(*win_pct)));
        }
        table.push_row(Row::new(Styles::default(), row_cells));
    }
    table
}

pub fn tabulate_results(results: &[MatchResult]) -> Table {
    let mut table = with_header(
        &[6, 12, 30, 20, 40],
        &["Match", "Date", "Opponent", "Result", "Venue"],
    );
    table.push_rows(results.iter().map(|result| {
        Row::new(
            Styles::default(),
            vec![
                right(result.match_id),
                left(result.date),
                left(&result.opponent),
                left(result.detail()),
                left(&result.venue),
            ],
        )
    }));
    table
}

pub fn tabulate_players(players: &[PlayerSeasonStat]) -> Table {
    let mut table = with_header(
        &[20, 30, 8, 4, 6, 8, 8, 4, 4, 6, 8],
        &["Player", "Team", "Role", "M", "Runs", "Avg", "SR", "50s", "100s", "Wkts", "Econ"],
    );
    table.push_rows(players.iter().map(|player| {
        Row::new(
            Styles::default(),
            vec![
                left(&player.player_name),
                left(&player.team),
                left(player.role),
                right(player.matches),
                right(player.runs),
                right(format!("{:.2}", player.average)),
                right(format!("{:.2}", player.strike_rate)),
                right(player.fifties),
                right(player.hundreds),
                right(player.wickets),
                right(format!("{:.2}", player.economy)),
            ],
        )
    }));
    table
}

/// Lays out titled tables side by side.
fn side_by_side(panels: Vec<(String, Table)>) -> Table {
    let mut titles: Vec<Cell> = vec![];
    let mut contents: Vec<Cell> = vec![];
    for (title, table) in panels {
        titles.push(title.into());
        contents.push(table.into());
    }
    Table::with_styles(Styles::default().with(HAlign::Centred))
        .with_cols(titles.iter().map(|_| Col::new(Styles::default().with(Separator(true)))).collect())
        .with_row(Row::new(Styles::default().with(Header(true)), titles))
        .with_row(Row::new(Styles::default(), contents))
}

fn titles_line(titles: &[Season]) -> String {
    if titles.is_empty() {
        "no titles".to_string()
    } else {
        format!("titles in {}", DisplaySlice::from(titles))
    }
}

pub fn tabulate(outcome: &Outcome) -> Table {
    match outcome {
        Outcome::SeasonOverview(overview) => tabulate_overview(overview),
        Outcome::Standings(rows) => tabulate_standings(rows),
        Outcome::Champion(champion) => tabulate_figures(vec![("Champion", champion.to_string())]),
        Outcome::MostWins(most_wins) => tabulate_figures(vec![
            ("Team", DisplayOption(most_wins.as_ref().map(|most| &most.team.name)).to_string()),
            ("Wins", DisplayOption(most_wins.as_ref().map(|most| &most.wins)).to_string()),
        ]),
        Outcome::WinTypeSplit(split) => tabulate_win_type_split(split),
        Outcome::TossImpact(impact) => tabulate_toss_impact(impact),
        Outcome::MarginTrend(kind, trend) => tabulate_margin_trend(*kind, trend),
        Outcome::TossDecisionTrend(trend) => tabulate_toss_decisions(trend),
        Outcome::TossImpactTrend(trend) => tabulate_toss_impacts(trend),
        Outcome::WinTypeTrend(trend) => tabulate_win_types(trend),
        Outcome::TeamHistory { team, history, titles } => {
            side_by_side(vec![(format!("{team}: {}", titles_line(titles)), tabulate_history(history))])
        }
        Outcome::ChampionshipTally(tally) => tabulate_tally(tally),
        Outcome::ChampionsTimeline(timeline) => tabulate_timeline(timeline),
        Outcome::AverageWins(averages) => tabulate_average_wins(averages),
        Outcome::WinPercentageGrid(grid) => tabulate_grid(grid),
        Outcome::TeamResults { results, .. } => tabulate_results(results),
        Outcome::Players(players) => tabulate_players(players),
        Outcome::TopPlayers { batsmen, bowlers } => side_by_side(vec![
            ("Top batsmen".to_string(), tabulate_players(batsmen)),
            ("Top bowlers".to_string(), tabulate_players(bowlers)),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use stanza::renderer::console::Console;
    use stanza::renderer::Renderer;

    use super::*;
    use crate::aggregate::{standings, win_percentage_grid};
    use crate::testing::{batsman, bowler, competed, suspended};

    fn render(table: &Table) -> String {
        Console::default().render(table).to_string()
    }

    #[test]
    fn standings_rendered() {
        let rows = standings(&[
            competed("Sunrisers Hyderabad", 2016, 14, 8, 0.245),
            competed("Gujarat Lions", 2016, 14, 9, -0.374),
            suspended("Chennai Super Kings", 2016),
        ]);
        let rendered = render(&tabulate(&Outcome::Standings(rows)));
        assert!(rendered.contains("Gujarat Lions"));
        assert!(rendered.contains("-0.37"));
        assert!(rendered.contains("+0.24"));
        assert!(!rendered.contains("Chennai Super Kings"));
    }

    #[test]
    fn undefined_figures_rendered() {
        let rendered = render(&tabulate(&Outcome::MostWins(None)));
        assert!(rendered.contains("N/A"));

        let grid = win_percentage_grid(&[
            competed("Mumbai Indians", 2015, 14, 8, -0.04),
            competed("Gujarat Lions", 2016, 14, 9, -0.374),
        ]);
        let rendered = render(&tabulate(&Outcome::WinPercentageGrid(grid)));
        assert!(rendered.contains("64.29%"));
        assert!(rendered.contains("N/A"));
    }

    #[test]
    fn top_players_side_by_side() {
        let rendered = render(&tabulate(&Outcome::TopPlayers {
            batsmen: vec![batsman(1, "Sunrisers Hyderabad", 2016, 848, 60.57, 151.42)],
            bowlers: vec![bowler(2, "Sunrisers Hyderabad", 2016, 23, 7.42)],
        }));
        assert!(rendered.contains("Top batsmen"));
        assert!(rendered.contains("Top bowlers"));
        assert!(rendered.contains("Player_1"));
        assert!(rendered.contains("7.42"));
    }

    #[test]
    fn titles_line_lists_seasons() {
        assert_eq!("no titles", titles_line(&[]));
        assert_eq!("titles in [2013, 2015]", titles_line(&[2013, 2015]));
    }
}
