//! Tournament configuration: format, cycles, ordering policy and advisory game rules.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::standings::TeamStats;
use crate::models::TournamentError;

/// Which format the schedule is generated in.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentType {
    #[default]
    RoundRobin,
    Elimination,
}

/// How the standings table is ordered. Points for is always the last key.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Point differential, then wins.
    #[default]
    PdWins,
    /// Wins, then point differential.
    WinsPd,
    /// Point differential only.
    PdOnly,
}

impl OrderingPolicy {
    /// Compare two rows for the standings table (best first).
    pub fn compare(self, a: &TeamStats, b: &TeamStats) -> Ordering {
        let primary = match self {
            OrderingPolicy::PdWins => b
                .point_diff
                .cmp(&a.point_diff)
                .then_with(|| b.wins.cmp(&a.wins)),
            OrderingPolicy::WinsPd => b
                .wins
                .cmp(&a.wins)
                .then_with(|| b.point_diff.cmp(&a.point_diff)),
            OrderingPolicy::PdOnly => b.point_diff.cmp(&a.point_diff),
        };
        primary.then_with(|| b.points_for.cmp(&a.points_for))
    }

    /// True when two rows are level on the primary and secondary keys of this policy.
    /// Points for is not consulted: a tie here is what calls for a decider match.
    pub fn is_tied(self, a: &TeamStats, b: &TeamStats) -> bool {
        match self {
            OrderingPolicy::PdWins | OrderingPolicy::WinsPd => {
                a.point_diff == b.point_diff && a.wins == b.wins
            }
            OrderingPolicy::PdOnly => a.point_diff == b.point_diff,
        }
    }
}

/// Rules chosen during setup. `games_to`, `win_by_two` and `allow_ties` are shown to
/// players but never enforced on entered scores.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub name: String,
    pub tournament_type: TournamentType,
    pub games_to: u32,
    /// How many times every pair meets (round-robin only).
    pub cycles: u32,
    pub win_by_two: bool,
    pub allow_ties: bool,
    /// Shuffle the order of pairs within each cycle.
    pub shuffle_pairs: bool,
    pub ordering: OrderingPolicy,
    /// Add a decider match when the top two finish level.
    pub create_final: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            tournament_type: TournamentType::RoundRobin,
            games_to: 11,
            cycles: 1,
            win_by_two: true,
            allow_ties: false,
            shuffle_pairs: true,
            ordering: OrderingPolicy::PdWins,
            create_final: false,
        }
    }
}

impl TournamentConfig {
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.cycles == 0 {
            return Err(TournamentError::InvalidConfig(
                "cycles must be at least 1".to_string(),
            ));
        }
        if self.games_to == 0 {
            return Err(TournamentError::InvalidConfig(
                "games to must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial configuration change; unset fields keep their current value.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ConfigUpdate {
    pub name: Option<String>,
    pub tournament_type: Option<TournamentType>,
    pub games_to: Option<u32>,
    pub cycles: Option<u32>,
    pub win_by_two: Option<bool>,
    pub allow_ties: Option<bool>,
    pub shuffle_pairs: Option<bool>,
    pub ordering: Option<OrderingPolicy>,
    pub create_final: Option<bool>,
}

impl ConfigUpdate {
    /// Apply on top of `config`, returning the merged result. Does not validate.
    pub fn merged_into(self, config: &TournamentConfig) -> TournamentConfig {
        TournamentConfig {
            name: self.name.map(|n| n.trim().to_string()).unwrap_or_else(|| config.name.clone()),
            tournament_type: self.tournament_type.unwrap_or(config.tournament_type),
            games_to: self.games_to.unwrap_or(config.games_to),
            cycles: self.cycles.unwrap_or(config.cycles),
            win_by_two: self.win_by_two.unwrap_or(config.win_by_two),
            allow_ties: self.allow_ties.unwrap_or(config.allow_ties),
            shuffle_pairs: self.shuffle_pairs.unwrap_or(config.shuffle_pairs),
            ordering: self.ordering.unwrap_or(config.ordering),
            create_final: self.create_final.unwrap_or(config.create_final),
        }
    }
}
