//! Tournament manager: library with models, business logic and persistence.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    calculate_standings, champion, clear_score, generate_schedule, record_score,
    regenerate_schedule, start_tournament, tournament_standings, update_decider, Champion,
};
pub use models::{
    ConfigUpdate, GameMatch, MatchId, MatchKind, MatchLedger, NextMatch, OrderingPolicy, Progress,
    RoundLabel, Slot, Team, TeamId, TeamSlot, TeamStats, Tournament, TournamentConfig,
    TournamentError, TournamentId, TournamentState, TournamentType, DECIDER_MATCH_ID,
};
pub use storage::{
    export_json, import_into, import_json, standings_csv, JsonFileStore, MemoryStore, StateStore,
};
