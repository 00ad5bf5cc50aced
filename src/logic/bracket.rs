//! Single-elimination bracket: power-of-two tree, BYE seeding and winner links.

use crate::models::{GameMatch, NextMatch, Slot, Team, TeamSlot, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Smallest power of two that fits `teams` entrants.
pub fn bracket_size(teams: usize) -> usize {
    teams.max(1).next_power_of_two()
}

/// Number of entrants per round, first round first (`size, size/2, …, 2`).
pub fn round_sizes(bracket_size: usize) -> Vec<usize> {
    let mut sizes = Vec::new();
    let mut size = bracket_size;
    while size >= 2 {
        sizes.push(size);
        size /= 2;
    }
    sizes
}

fn match_id(round: usize, index: usize) -> String {
    format!("r{}_m{}", round, index)
}

/// Build every match of the bracket, round by round, with links already set.
///
/// The first round is seeded from a shuffled copy of `teams`: slot A of every match is
/// filled before any slot B, so a BYE only ever meets a team. Later rounds start empty.
/// BYE matches are not resolved here; the caller runs them through advancement once
/// the matches live in a ledger.
pub fn generate_bracket_matches<R: Rng + ?Sized>(
    teams: &[Team],
    rng: &mut R,
) -> Result<Vec<GameMatch>, TournamentError> {
    if teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams { required: 2 });
    }

    let size = bracket_size(teams.len());
    let sizes = round_sizes(size);
    let mut matches = Vec::with_capacity(size - 1);

    for (round_idx, &round_size) in sizes.iter().enumerate() {
        let round = round_idx + 1;
        let is_final = round_idx + 1 == sizes.len();
        for local in 0..round_size / 2 {
            let next = (!is_final).then(|| NextMatch {
                match_id: match_id(round + 1, local / 2),
                slot: if local % 2 == 0 { Slot::A } else { Slot::B },
            });
            matches.push(GameMatch::elimination(match_id(round, local), round_size, next));
        }
    }

    let mut seeded: Vec<&Team> = teams.iter().collect();
    seeded.shuffle(rng);

    let first_round = size / 2;
    let mut seeds = seeded.into_iter().map(|t| TeamSlot::Team(t.id));
    for m in matches.iter_mut().take(first_round) {
        m.team_a = seeds.next().unwrap_or(TeamSlot::Bye);
    }
    for m in matches.iter_mut().take(first_round) {
        m.team_b = seeds.next().unwrap_or(TeamSlot::Bye);
    }

    log::debug!(
        "Built bracket of size {} for {} teams ({} byes)",
        size,
        teams.len(),
        size - teams.len()
    );
    Ok(matches)
}
