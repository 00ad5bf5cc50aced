//! Data structures for the tournament: teams, rules, matches, ledger and session state.

mod config;
mod game;
mod ledger;
mod standings;
mod team;
mod tournament;

pub use config::{ConfigUpdate, OrderingPolicy, TournamentConfig, TournamentType};
pub use game::{GameMatch, MatchId, MatchKind, NextMatch, RoundLabel, Slot, TeamSlot};
pub use ledger::{MatchLedger, DECIDER_MATCH_ID};
pub use standings::TeamStats;
pub use team::{Team, TeamId};
pub use tournament::{Progress, Tournament, TournamentError, TournamentId, TournamentState};
