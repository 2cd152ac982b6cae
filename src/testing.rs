//! Testing helpers.

use assert_float_eq::*;
use chrono::NaiveDate;

use crate::domain::{Match, PlayerSeasonStat, Role, Season, TeamIdentity, TeamSeasonRecord, TossDecision};

/// Asserts that a derived percentage or ratio is defined and near the `expected` value.
pub fn assert_defined_near(expected: f64, actual: Option<f64>) {
    match actual {
        None => panic!("expected {expected}, got an undefined value"),
        Some(actual) => {
            if actual != expected {
                assert_float_absolute_eq!(expected, actual, 1e-9);
            }
        }
    }
}

/// An identity whose code is made of the initials of the team name.
pub fn identity(name: &str) -> TeamIdentity {
    let code: String = name.split_whitespace().filter_map(|word| word.chars().next()).collect();
    TeamIdentity::new(name, code, "#000000")
}

pub fn competed(name: &str, season: Season, played: u32, wins: u32, net_run_rate: f64) -> TeamSeasonRecord {
    TeamSeasonRecord::competed(identity(name), season, wins, played - wins, net_run_rate)
}

pub fn suspended(name: &str, season: Season) -> TeamSeasonRecord {
    TeamSeasonRecord::suspended(identity(name), season)
}

fn date(season: Season, id: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(season as i32, 4, id % 28 + 1).unwrap()
}

/// `team1` bats first after winning the toss and defends its total by `runs`.
pub fn match_won_by_runs(id: u32, season: Season, team1: &str, team2: &str, runs: u32) -> Match {
    Match {
        id,
        season,
        date: date(season, id),
        team1: team1.into(),
        team2: team2.into(),
        winner: Some(team1.into()),
        win_by_runs: runs,
        win_by_wickets: 0,
        city: "Mumbai".into(),
        venue: "Wankhede Stadium".into(),
        toss_winner: team1.into(),
        toss_decision: TossDecision::Bat,
    }
}

/// `team2` wins the toss, fields first and chases with `wickets` in hand.
pub fn match_won_by_wickets(id: u32, season: Season, team1: &str, team2: &str, wickets: u32) -> Match {
    Match {
        id,
        season,
        date: date(season, id),
        team1: team1.into(),
        team2: team2.into(),
        winner: Some(team2.into()),
        win_by_runs: 0,
        win_by_wickets: wickets,
        city: "Kolkata".into(),
        venue: "Eden Gardens".into(),
        toss_winner: team2.into(),
        toss_decision: TossDecision::Field,
    }
}

pub fn batsman(player_id: u32, team: &str, season: Season, runs: u32, average: f64, strike_rate: f64) -> PlayerSeasonStat {
    PlayerSeasonStat {
        player_id,
        player_name: format!("Player_{player_id}"),
        team: team.into(),
        season,
        matches: 12,
        runs,
        average,
        strike_rate,
        fifties: runs / 150,
        hundreds: 0,
        wickets: 1,
        economy: 9.5,
        role: Role::Batsman,
    }
}

pub fn bowler(player_id: u32, team: &str, season: Season, wickets: u32, economy: f64) -> PlayerSeasonStat {
    PlayerSeasonStat {
        player_id,
        player_name: format!("Player_{player_id}"),
        team: team.into(),
        season,
        matches: 12,
        runs: 60,
        average: 15.0,
        strike_rate: 110.0,
        fifties: 0,
        hundreds: 0,
        wickets,
        economy,
        role: Role::Bowler,
    }
}
