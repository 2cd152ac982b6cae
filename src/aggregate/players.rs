use std::borrow::Borrow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::domain::{PlayerSeasonStat, Role};

/// Number of players in a top-players list unless the caller asks otherwise.
pub const TOP_PLAYERS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PlayerSort {
    Runs,
    Average,
    StrikeRate,
    Wickets,
    Economy,
}
impl PlayerSort {
    fn compare(&self, a: &PlayerSeasonStat, b: &PlayerSeasonStat) -> Ordering {
        match self {
            PlayerSort::Runs => a.runs.cmp(&b.runs),
            PlayerSort::Average => a.average.total_cmp(&b.average),
            PlayerSort::StrikeRate => a.strike_rate.total_cmp(&b.strike_rate),
            PlayerSort::Wickets => a.wickets.cmp(&b.wickets),
            PlayerSort::Economy => a.economy.total_cmp(&b.economy),
        }
    }

    /// The natural sort for a role: runs for batsmen, wickets for bowlers.
    pub fn default_for(role: Option<Role>) -> Self {
        match role {
            Some(Role::Bowler) => PlayerSort::Wickets,
            _ => PlayerSort::Runs,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Order {
    Ascending,
    #[default]
    Descending,
}

/// Player seasons of the given role (or of every role), ordered by `sort`. The sort is stable in
/// either direction: players level on the key keep their input order.
pub fn leaderboard<P: Borrow<PlayerSeasonStat>>(
    players: &[P],
    role: Option<Role>,
    sort: PlayerSort,
    order: Order,
) -> Vec<PlayerSeasonStat> {
    let mut ranked = players
        .iter()
        .map(Borrow::borrow)
        .filter(|player: &&PlayerSeasonStat| role.map_or(true, |role| player.role == role))
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| match order {
        Order::Ascending => sort.compare(a, b),
        Order::Descending => sort.compare(b, a),
    });
    ranked.into_iter().cloned().collect()
}

/// The `limit` batsmen with the most runs.
pub fn top_batsmen<P: Borrow<PlayerSeasonStat>>(players: &[P], limit: usize) -> Vec<PlayerSeasonStat> {
    let mut top = leaderboard(players, Some(Role::Batsman), PlayerSort::Runs, Order::Descending);
    top.truncate(limit);
    top
}

/// The `limit` bowlers with the most wickets.
pub fn top_bowlers<P: Borrow<PlayerSeasonStat>>(players: &[P], limit: usize) -> Vec<PlayerSeasonStat> {
    let mut top = leaderboard(players, Some(Role::Bowler), PlayerSort::Wickets, Order::Descending);
    top.truncate(limit);
    top
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::testing::{batsman, bowler};

    fn players() -> Vec<PlayerSeasonStat> {
        vec![
            batsman(1, "Royal Challengers Bangalore", 2016, 973, 81.08, 152.03),
            bowler(2, "Sunrisers Hyderabad", 2016, 23, 7.42),
            batsman(3, "Sunrisers Hyderabad", 2016, 848, 60.57, 151.42),
            bowler(4, "Mumbai Indians", 2016, 17, 8.15),
            batsman(5, "Gujarat Lions", 2016, 501, 38.54, 144.79),
            bowler(6, "Gujarat Lions", 2016, 23, 8.67),
            batsman(7, "Delhi Daredevils", 2016, 501, 35.79, 127.0),
        ]
    }

    fn ids(players: &[PlayerSeasonStat]) -> Vec<u32> {
        players.iter().map(|player| player.player_id).collect()
    }

    #[test]
    fn top_lists() {
        let players = players();
        assert_eq!(vec![1, 3], ids(&top_batsmen(&players, 2)));
        assert_eq!(vec![2, 6, 4], ids(&top_bowlers(&players, TOP_PLAYERS)));
    }

    #[test]
    fn ties_keep_input_order_both_ways() {
        let players = players();
        assert_eq!(
            vec![1, 3, 5, 7],
            ids(&leaderboard(&players, Some(Role::Batsman), PlayerSort::Runs, Order::Descending))
        );
        assert_eq!(
            vec![5, 7, 3, 1],
            ids(&leaderboard(&players, Some(Role::Batsman), PlayerSort::Runs, Order::Ascending))
        );
    }

    #[test]
    fn economy_ascending() {
        let players = players();
        assert_eq!(
            vec![2, 4, 6],
            ids(&leaderboard(&players, Some(Role::Bowler), PlayerSort::Economy, Order::Ascending))
        );
    }

    #[test]
    fn every_role() {
        let players = players();
        let board = leaderboard(&players, None, PlayerSort::StrikeRate, Order::Descending);
        assert_eq!(7, board.len());
        assert_eq!(1, board[0].player_id);
    }

    #[test]
    fn role_restricts_board() {
        let players = players();
        let board = leaderboard(&players, Some(Role::Bowler), PlayerSort::Runs, Order::Descending);
        assert_eq!(vec![2, 4, 6], ids(&board));
        assert!(board.iter().all(|player| player.role == Role::Bowler));
    }

    #[test]
    fn empty_board() {
        let players: Vec<PlayerSeasonStat> = vec![];
        assert!(top_batsmen(&players, 5).is_empty());
        assert!(leaderboard(&players, None, PlayerSort::Average, Order::Ascending).is_empty());
    }

    #[test]
    fn parse_sort_and_order() {
        assert_eq!(PlayerSort::StrikeRate, PlayerSort::from_str("strike_rate").unwrap());
        assert_eq!("strike_rate", PlayerSort::StrikeRate.to_string());
        assert_eq!(Order::Ascending, Order::from_str("Ascending").unwrap());
        assert_eq!(PlayerSort::Wickets, PlayerSort::default_for(Some(Role::Bowler)));
    }
}
