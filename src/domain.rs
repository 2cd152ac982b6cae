//! The three record streams of the league: matches, player seasons and team seasons.

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub mod error;

/// One edition of the tournament, identified by its year.
pub type Season = u16;

/// Points awarded per win. A loss or no-result scores nothing.
pub const POINTS_PER_WIN: u32 = 2;

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamIdentity {
    #[serde(rename = "team")]
    pub name: String,
    #[serde(rename = "team_code")]
    pub code: String,
    #[serde(rename = "team_color")]
    pub colour: String,
}
impl TeamIdentity {
    pub fn new(name: impl Into<String>, code: impl Into<String>, colour: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            colour: colour.into(),
        }
    }
}

impl Display for TeamIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TossDecision {
    Bat,
    Field,
}

#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Batsman,
    Bowler,
}

/// How a match was won: defending a total (by runs) or chasing it down (by wickets).
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Margin {
    Runs(u32),
    Wickets(u32),
}

impl Display for Margin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Margin::Runs(runs) => write!(f, "{runs} runs"),
            Margin::Wickets(wickets) => write!(f, "{wickets} wickets"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: u32,
    pub season: Season,
    pub date: NaiveDate,
    pub team1: String,
    pub team2: String,
    pub winner: Option<String>,
    #[serde(default)]
    pub win_by_runs: u32,
    #[serde(default)]
    pub win_by_wickets: u32,
    pub city: String,
    pub venue: String,
    pub toss_winner: String,
    pub toss_decision: TossDecision,
}
impl Match {
    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    /// The other side in this match, if `team` played in it.
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if self.team1 == team {
            Some(&self.team2)
        } else if self.team2 == team {
            Some(&self.team1)
        } else {
            None
        }
    }

    pub fn is_won_by(&self, team: &str) -> bool {
        self.winner.as_deref() == Some(team)
    }

    pub fn toss_winner_won(&self) -> bool {
        self.is_won_by(&self.toss_winner)
    }

    /// The winning margin, if one was recorded. Assumes the record has been validated, so that at
    /// most one of the two margins is positive.
    pub fn margin(&self) -> Option<Margin> {
        if self.win_by_runs > 0 {
            Some(Margin::Runs(self.win_by_runs))
        } else if self.win_by_wickets > 0 {
            Some(Margin::Wickets(self.win_by_wickets))
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonStat {
    pub player_id: u32,
    pub player_name: String,
    pub team: String,
    pub season: Season,
    pub matches: u32,
    pub runs: u32,
    #[serde(rename = "avg")]
    pub average: f64,
    pub strike_rate: f64,
    pub fifties: u32,
    pub hundreds: u32,
    pub wickets: u32,
    pub economy: f64,
    #[serde(rename = "player_type")]
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonRecord {
    #[serde(flatten)]
    pub team: TeamIdentity,
    pub season: Season,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
    #[serde(rename = "nrr")]
    pub net_run_rate: f64,
    pub title_winner: bool,
    #[serde(rename = "banned")]
    pub suspended: bool,
}
impl TeamSeasonRecord {
    /// A record for a team that completed the season. Points follow from the wins. Counters that
    /// would overflow saturate, which validation then reports.
    pub fn competed(team: TeamIdentity, season: Season, wins: u32, losses: u32, net_run_rate: f64) -> Self {
        Self {
            team,
            season,
            matches_played: wins.saturating_add(losses),
            wins,
            losses,
            points: wins.saturating_mul(POINTS_PER_WIN),
            net_run_rate,
            title_winner: false,
            suspended: false,
        }
    }

    /// A zeroed record for a team barred from the season.
    pub fn suspended(team: TeamIdentity, season: Season) -> Self {
        Self {
            team,
            season,
            matches_played: 0,
            wins: 0,
            losses: 0,
            points: 0,
            net_run_rate: 0.0,
            title_winner: false,
            suspended: true,
        }
    }

    pub fn with_title(mut self) -> Self {
        self.title_winner = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.team.name
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn fixture() -> Match {
        Match {
            id: 7,
            season: 2019,
            date: NaiveDate::from_ymd_opt(2019, 4, 12).unwrap(),
            team1: "Mumbai Indians".into(),
            team2: "Chennai Super Kings".into(),
            winner: Some("Chennai Super Kings".into()),
            win_by_runs: 0,
            win_by_wickets: 6,
            city: "Chennai".into(),
            venue: "Chepauk".into(),
            toss_winner: "Mumbai Indians".into(),
            toss_decision: TossDecision::Bat,
        }
    }

    #[test]
    fn opponent_of() {
        let m = fixture();
        assert_eq!(Some("Chennai Super Kings"), m.opponent_of("Mumbai Indians"));
        assert_eq!(Some("Mumbai Indians"), m.opponent_of("Chennai Super Kings"));
        assert_eq!(None, m.opponent_of("Gujarat Titans"));
    }

    #[test]
    fn toss_winner_won() {
        let mut m = fixture();
        assert!(!m.toss_winner_won());
        m.toss_winner = "Chennai Super Kings".into();
        assert!(m.toss_winner_won());
        m.winner = None;
        assert!(!m.toss_winner_won());
    }

    #[test]
    fn margin() {
        let mut m = fixture();
        assert_eq!(Some(Margin::Wickets(6)), m.margin());
        assert_eq!("6 wickets", m.margin().unwrap().to_string());
        m.win_by_wickets = 0;
        assert_eq!(None, m.margin());
        m.win_by_runs = 23;
        assert_eq!("23 runs", m.margin().unwrap().to_string());
    }

    #[test]
    fn competed_points() {
        let record = TeamSeasonRecord::competed(TeamIdentity::new("Mumbai Indians", "MI", "#004BA0"), 2020, 9, 5, 1.1);
        assert_eq!(14, record.matches_played);
        assert_eq!(18, record.points);
    }

    #[test]
    fn competed_saturates() {
        let record = TeamSeasonRecord::competed(TeamIdentity::new("Mumbai Indians", "MI", "#004BA0"), 2020, u32::MAX, 1, 0.0);
        assert_eq!(u32::MAX, record.matches_played);
        assert_eq!(u32::MAX, record.points);
        assert!(record.validate().is_err());
    }

    #[test]
    fn parse_enums() {
        assert_eq!(TossDecision::Field, TossDecision::from_str("field").unwrap());
        assert_eq!("bat", TossDecision::Bat.to_string());
        assert_eq!(Role::Bowler, Role::from_str("bowler").unwrap());
    }

    #[test]
    fn deserialise_team_season() {
        let json = r##"{
            "team": "Chennai Super Kings", "team_code": "CSK", "team_color": "#FDB913",
            "season": 2016, "matches_played": 0, "wins": 0, "losses": 0, "points": 0,
            "nrr": 0, "title_winner": false, "banned": true
        }"##;
        let record: TeamSeasonRecord = serde_json::from_str(json).unwrap();
        assert_eq!(TeamSeasonRecord::suspended(TeamIdentity::new("Chennai Super Kings", "CSK", "#FDB913"), 2016), record);
    }

    #[test]
    fn deserialise_match() {
        let json = r#"{
            "id": 1, "season": 2008, "date": "2008-04-18", "team1": "Kolkata Knight Riders",
            "team2": "Royal Challengers Bangalore", "winner": null, "city": "Bangalore",
            "venue": "Chinnaswamy Stadium", "toss_winner": "Royal Challengers Bangalore",
            "toss_decision": "field"
        }"#;
        let m: Match = serde_json::from_str(json).unwrap();
        assert_eq!(None, m.winner);
        assert_eq!(0, m.win_by_runs);
        assert_eq!(TossDecision::Field, m.toss_decision);
        assert_eq!(NaiveDate::from_ymd_opt(2008, 4, 18).unwrap(), m.date);
    }
}
