//! Short flavour lines attached to each side of a completed match.

use crate::models::GameMatch;
use rand::seq::SliceRandom;
use rand::Rng;

pub const WINNER_PHRASES: &[&str] = &[
    "Unstoppable today",
    "Clinical finish",
    "Owned the big points",
    "Too hot to handle",
    "Smooth as silk",
    "Pure dominance",
    "Ice in the veins",
    "Ran away with it",
];

pub const LOSER_PHRASES: &[&str] = &[
    "Gave it everything",
    "Rough day at the office",
    "Back to the drawing board",
    "Ran out of gas",
    "So close, yet so far",
    "Will be back stronger",
    "Couldn't find the rhythm",
    "Brave effort",
];

pub const DRAW_PHRASES: &[&str] = &[
    "Nothing to separate them",
    "Honours even",
    "Deadlocked",
    "Evenly matched",
];

fn pick<R: Rng + ?Sized>(table: &[&str], rng: &mut R) -> String {
    table.choose(rng).copied().unwrap_or_default().to_string()
}

/// Give a completed match its commentary if it has none yet.
///
/// Existing commentary is kept so the lines stay put across edits. Incomplete matches
/// are untouched.
pub fn assign_commentary<R: Rng + ?Sized>(game: &mut GameMatch, rng: &mut R) {
    if game.commentary_a.is_some() || game.commentary_b.is_some() {
        return;
    }
    let (Some(a), Some(b)) = (game.score_a, game.score_b) else {
        return;
    };
    let (line_a, line_b) = match a.cmp(&b) {
        std::cmp::Ordering::Greater => (pick(WINNER_PHRASES, rng), pick(LOSER_PHRASES, rng)),
        std::cmp::Ordering::Less => (pick(LOSER_PHRASES, rng), pick(WINNER_PHRASES, rng)),
        std::cmp::Ordering::Equal => (pick(DRAW_PHRASES, rng), pick(DRAW_PHRASES, rng)),
    };
    game.commentary_a = Some(line_a);
    game.commentary_b = Some(line_b);
}

/// Remove commentary, e.g. when a result is cleared.
pub fn clear_commentary(game: &mut GameMatch) {
    game.commentary_a = None;
    game.commentary_b = None;
}
