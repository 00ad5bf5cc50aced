//! Tournament business logic: scheduling, brackets, scoring, standings, deciders, champion.

mod advancement;
mod bracket;
mod champion;
mod commentary;
mod finals;
mod round_robin;
mod scoring;
mod setup;
mod standings;

pub use advancement::{advance_winner, resolve_bye, resolve_first_round_byes};
pub use bracket::{bracket_size, generate_bracket_matches, round_sizes};
pub use champion::{champion, Champion};
pub use commentary::{assign_commentary, DRAW_PHRASES, LOSER_PHRASES, WINNER_PHRASES};
pub use finals::update_decider;
pub use round_robin::{generate_round_robin_matches, round_robin_pairs};
pub use scoring::{clear_score, record_score};
pub use setup::{generate_schedule, regenerate_schedule, start_tournament};
pub use standings::{calculate_standings, tournament_standings};
