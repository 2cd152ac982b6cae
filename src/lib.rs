//! Derived statistics over a multi-season T20 league. Three record streams (matches, player
//! seasons and team seasons) are validated into a store, then filtered by season and team and
//! reduced to standings, toss and win-type breakdowns, margin trends, championship history and
//! player leaderboards.

pub mod aggregate;
pub mod analysis;
pub mod csv;
pub mod demo;
pub mod display;
pub mod domain;
pub mod eligibility;
pub mod file;
pub mod filter;
pub mod print;
pub mod stats;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
