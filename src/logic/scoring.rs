//! Score entry: record or clear a result and let the rest of the tournament react.

use crate::logic::advancement::advance_winner;
use crate::logic::commentary::{assign_commentary, clear_commentary};
use crate::logic::finals::update_decider;
use crate::models::{MatchKind, Tournament};
use rand::Rng;

/// Set the scores of a match (scheduled or decider). `None` means "not entered".
///
/// 1. Unknown ids are ignored (stale references from the UI); returns false.
/// 2. Both scores set marks the match complete and hands out commentary once.
/// 3. Anything unset marks it incomplete and clears commentary.
/// 4. A completed elimination match with a winner advances it; a level score stalls.
/// 5. The decider is re-evaluated for round-robin schedules.
pub fn record_score<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    match_id: &str,
    score_a: Option<i32>,
    score_b: Option<i32>,
    rng: &mut R,
) -> bool {
    let game = match tournament.ledger.find_mut(match_id) {
        Some(m) => m,
        None => {
            log::debug!("Ignoring score for unknown match {}", match_id);
            return false;
        }
    };

    game.score_a = score_a;
    game.score_b = score_b;
    game.completed = score_a.is_some() && score_b.is_some();
    if game.completed {
        assign_commentary(game, rng);
    } else {
        clear_commentary(game);
    }

    let advance = game.completed && matches!(game.kind, MatchKind::Elimination { .. });
    if advance {
        if game.winner().is_some() {
            advance_winner(&mut tournament.ledger, match_id);
        } else {
            log::warn!("Match {} finished level; nobody advances", match_id);
        }
    }

    update_decider(tournament);
    true
}

/// Clear a result. Teams already advanced out of an elimination match stay where they are.
pub fn clear_score(tournament: &mut Tournament, match_id: &str) -> bool {
    record_score(tournament, match_id, None, None, &mut rand::thread_rng())
}
