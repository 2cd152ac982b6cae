//! A seeded generator of synthetic league data, for demonstrations and benchmarks. The same options
//! always yield the same dataset.

use std::ops::RangeInclusive;

use anyhow::{anyhow, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tinyrand::{Rand, Seeded, StdRand};
use tracing::debug;

use crate::display::DisplayRangeInclusive;
use crate::domain::{Match, PlayerSeasonStat, Role, Season, TeamIdentity, TeamSeasonRecord, TossDecision};
use crate::eligibility::SuspensionConfig;
use crate::store::Dataset;

pub const DEFAULT_SEED: u64 = 42;

struct Franchise {
    name: &'static str,
    code: &'static str,
    colour: &'static str,
    debut: Season,
}

static FRANCHISES: [Franchise; 10] = [
    Franchise { name: "Chennai Super Kings", code: "CSK", colour: "#FDB913", debut: 2008 },
    Franchise { name: "Mumbai Indians", code: "MI", colour: "#004BA0", debut: 2008 },
    Franchise { name: "Royal Challengers Bangalore", code: "RCB", colour: "#EC1C24", debut: 2008 },
    Franchise { name: "Kolkata Knight Riders", code: "KKR", colour: "#3A225D", debut: 2008 },
    Franchise { name: "Rajasthan Royals", code: "RR", colour: "#FF1493", debut: 2008 },
    Franchise { name: "Delhi Capitals", code: "DC", colour: "#0078BC", debut: 2008 },
    Franchise { name: "Kings XI Punjab", code: "PBKS", colour: "#ED1C24", debut: 2008 },
    Franchise { name: "Sunrisers Hyderabad", code: "SRH", colour: "#F7A721", debut: 2013 },
    Franchise { name: "Gujarat Titans", code: "GT", colour: "#1D3160", debut: 2022 },
    Franchise { name: "Lucknow Super Giants", code: "LSG", colour: "#A72056", debut: 2022 },
];

/// Title winners by season. Deccan Chargers, the 2009 winners, are not among the franchises, so
/// that season goes without a champion.
const CHAMPIONS: [(Season, &str); 17] = [
    (2008, "Rajasthan Royals"),
    (2009, "Deccan Chargers"),
    (2010, "Chennai Super Kings"),
    (2011, "Chennai Super Kings"),
    (2012, "Kolkata Knight Riders"),
    (2013, "Mumbai Indians"),
    (2014, "Kolkata Knight Riders"),
    (2015, "Mumbai Indians"),
    (2016, "Sunrisers Hyderabad"),
    (2017, "Mumbai Indians"),
    (2018, "Chennai Super Kings"),
    (2019, "Mumbai Indians"),
    (2020, "Mumbai Indians"),
    (2021, "Chennai Super Kings"),
    (2022, "Gujarat Titans"),
    (2023, "Chennai Super Kings"),
    (2024, "Kolkata Knight Riders"),
];

const CITIES: [&str; 6] = ["Mumbai", "Chennai", "Bangalore", "Kolkata", "Delhi", "Hyderabad"];

const VENUES: [&str; 4] = ["Wankhede Stadium", "Eden Gardens", "Chinnaswamy Stadium", "Chepauk"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub seed: u64,
    pub seasons: RangeInclusive<Season>,
    pub matches_per_season: usize,
    pub squad_size: usize,
}
impl GeneratorOptions {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.seasons.is_empty() {
            bail!("season range {} is empty", DisplayRangeInclusive::from(&self.seasons));
        }
        if self.squad_size == 0 {
            bail!("squad size must be positive");
        }
        Ok(())
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            seasons: 2008..=2024,
            matches_per_season: 60,
            squad_size: 20,
        }
    }
}

/// Generates matches, player seasons and team seasons for every season in the options. Teams
/// take part from their debut season onwards, except in seasons for which `config` suspends them.
pub fn generate(options: &GeneratorOptions, config: &SuspensionConfig) -> Result<Dataset, anyhow::Error> {
    options.validate()?;
    let mut rand = StdRand::seed(options.seed);
    let mut dataset = Dataset::default();

    let mut match_id = 1;
    for season in options.seasons.clone() {
        let active: Vec<&Franchise> = FRANCHISES
            .iter()
            .filter(|franchise| competes(franchise, season, config))
            .collect();
        if active.len() < 2 {
            continue;
        }
        for _ in 0..options.matches_per_season {
            dataset.matches.push(generate_match(&mut rand, match_id, season, &active)?);
            match_id += 1;
        }
    }

    let mut player_id = 1;
    for franchise in &FRANCHISES {
        for _ in 0..options.squad_size {
            for season in options.seasons.clone() {
                if competes(franchise, season, config) && random_f64(&mut rand) < 0.7 {
                    dataset.players.push(generate_player(&mut rand, player_id, franchise, season));
                }
            }
            player_id += 1;
        }
    }

    for franchise in &FRANCHISES {
        let team = TeamIdentity::new(franchise.name, franchise.code, franchise.colour);
        for season in options.seasons.clone() {
            if season < franchise.debut {
                continue;
            }
            let record = if config.is_suspended(season, franchise.name) {
                TeamSeasonRecord::suspended(team.clone(), season)
            } else {
                let played = 14 + rand.next_lim_u32(3);
                let wins = 4 + rand.next_lim_u32(played - 4);
                let net_run_rate = random_f64(&mut rand) * 4.0 - 2.0;
                let record = TeamSeasonRecord::competed(team.clone(), season, wins, played - wins, net_run_rate);
                if is_champion(franchise.name, season) {
                    record.with_title()
                } else {
                    record
                }
            };
            dataset.teams.push(record);
        }
    }

    debug!(
        "generated {} matches, {} player seasons and {} team seasons over {} with seed {}",
        dataset.matches.len(),
        dataset.players.len(),
        dataset.teams.len(),
        DisplayRangeInclusive::from(&options.seasons),
        options.seed
    );
    Ok(dataset)
}

fn competes(franchise: &Franchise, season: Season, config: &SuspensionConfig) -> bool {
    season >= franchise.debut && !config.is_suspended(season, franchise.name)
}

fn is_champion(team: &str, season: Season) -> bool {
    CHAMPIONS.iter().any(|&(s, champion)| s == season && champion == team)
}

fn generate_match(rand: &mut impl Rand, id: u32, season: Season, active: &[&Franchise]) -> Result<Match, anyhow::Error> {
    let first = rand.next_lim_usize(active.len());
    let mut second = rand.next_lim_usize(active.len() - 1);
    if second >= first {
        second += 1;
    }
    let (team1, team2) = (active[first].name, active[second].name);
    let winner = if rand.next_bool_half() { team1 } else { team2 };
    let (win_by_runs, win_by_wickets) = if rand.next_bool_half() {
        (1 + rand.next_lim_u32(99), 0)
    } else {
        (0, 1 + rand.next_lim_u32(9))
    };
    let month = 4 + rand.next_lim_u32(2);
    let day = 1 + rand.next_lim_u32(27);
    let date = NaiveDate::from_ymd_opt(season as i32, month, day)
        .ok_or_else(|| anyhow!("no such date {season}-{month}-{day}"))?;
    let toss_winner = if rand.next_bool_half() { team1 } else { team2 };
    let toss_decision = if rand.next_bool_half() {
        TossDecision::Bat
    } else {
        TossDecision::Field
    };

    Ok(Match {
        id,
        season,
        date,
        team1: team1.into(),
        team2: team2.into(),
        winner: Some(winner.into()),
        win_by_runs,
        win_by_wickets,
        city: pick(rand, &CITIES).to_string(),
        venue: pick(rand, &VENUES).to_string(),
        toss_winner: toss_winner.into(),
        toss_decision,
    })
}

fn generate_player(rand: &mut impl Rand, player_id: u32, franchise: &Franchise, season: Season) -> PlayerSeasonStat {
    let matches = 5 + rand.next_lim_u32(10);
    if player_id % 3 != 0 {
        PlayerSeasonStat {
            player_id,
            player_name: format!("Player_{player_id}"),
            team: franchise.name.into(),
            season,
            matches,
            runs: 100 + rand.next_lim_u32(600),
            average: uniform(rand, 20.0, 50.0),
            strike_rate: uniform(rand, 120.0, 170.0),
            fifties: rand.next_lim_u32(5),
            hundreds: rand.next_lim_u32(2),
            wickets: rand.next_lim_u32(3),
            economy: uniform(rand, 7.0, 12.0),
            role: Role::Batsman,
        }
    } else {
        PlayerSeasonStat {
            player_id,
            player_name: format!("Player_{player_id}"),
            team: franchise.name.into(),
            season,
            matches,
            runs: 20 + rand.next_lim_u32(130),
            average: uniform(rand, 10.0, 25.0),
            strike_rate: uniform(rand, 100.0, 140.0),
            fifties: 0,
            hundreds: 0,
            wickets: 5 + rand.next_lim_u32(20),
            economy: uniform(rand, 6.0, 10.0),
            role: Role::Bowler,
        }
    }
}

trait RandExt {
    fn next_bool_half(&mut self) -> bool;
}
impl<R: Rand> RandExt for R {
    fn next_bool_half(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }
}

fn pick<'a>(rand: &mut impl Rand, items: &[&'a str]) -> &'a str {
    items[rand.next_lim_usize(items.len())]
}

fn uniform(rand: &mut impl Rand, low: f64, high: f64) -> f64 {
    low + random_f64(rand) * (high - low)
}

fn random_f64(rand: &mut impl Rand) -> f64 {
    rand.next_u64() as f64 / u64::MAX as f64
}
