//! Round-robin schedule: every pair meets once per cycle.

use crate::models::{GameMatch, Team, TeamId, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;

/// All unordered pairs of teams, in registry order (`C(n, 2)` of them).
pub fn round_robin_pairs(teams: &[Team]) -> Vec<(TeamId, TeamId)> {
    let mut pairs = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);
    for (i, a) in teams.iter().enumerate() {
        for b in &teams[i + 1..] {
            pairs.push((a.id, b.id));
        }
    }
    pairs
}

/// Generate `cycles × C(n, 2)` matches.
///
/// 1. Build the pair list once.
/// 2. For each cycle, copy it and shuffle if `shuffle_pairs`.
/// 3. Match ids are `m_{cycle}_{index}`, both stable for the life of the schedule.
pub fn generate_round_robin_matches<R: Rng + ?Sized>(
    teams: &[Team],
    cycles: u32,
    shuffle_pairs: bool,
    rng: &mut R,
) -> Result<Vec<GameMatch>, TournamentError> {
    if teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams { required: 2 });
    }
    if cycles == 0 {
        return Err(TournamentError::InvalidConfig(
            "cycles must be at least 1".to_string(),
        ));
    }

    let pairs = round_robin_pairs(teams);
    let mut matches = Vec::with_capacity(pairs.len() * cycles as usize);
    for cycle in 1..=cycles {
        let mut cycle_pairs = pairs.clone();
        if shuffle_pairs {
            cycle_pairs.shuffle(rng);
        }
        matches.extend(cycle_pairs.into_iter().enumerate().map(|(idx, (a, b))| {
            GameMatch::round_robin(format!("m_{}_{}", cycle, idx), cycle, a, b)
        }));
    }
    Ok(matches)
}
