//! Decider match for a round-robin whose top two finish level.

use crate::logic::standings::tournament_standings;
use crate::models::{GameMatch, Tournament, TournamentType, DECIDER_MATCH_ID};

/// Re-evaluate whether a decider is needed and create or discard it.
///
/// While the schedule is unfinished the decider is left as it is. Once every scheduled
/// match is complete, a decider exists exactly when `create_final` is on and the top
/// two are level under the ordering policy; it pairs those two teams.
pub fn update_decider(tournament: &mut Tournament) {
    if tournament.config.tournament_type != TournamentType::RoundRobin {
        tournament.ledger.set_decider(None);
        return;
    }
    if !tournament.ledger.all_completed() {
        return;
    }

    let standings = tournament_standings(tournament);
    let policy = tournament.config.ordering;
    let tied_pair = match standings.as_slice() {
        [first, second, ..] if tournament.config.create_final && policy.is_tied(first, second) => {
            Some((first.team_id, second.team_id))
        }
        _ => None,
    };

    match tied_pair {
        Some((a, b)) => {
            // Either slot order counts as the same pairing.
            let pairs_same_teams = tournament.ledger.decider().is_some_and(|d| {
                let pair = [d.team_a.team_id(), d.team_b.team_id()];
                pair.contains(&Some(a)) && pair.contains(&Some(b))
            });
            if !pairs_same_teams {
                log::info!("Top two level after all matches; creating decider {} vs {}", a, b);
                tournament
                    .ledger
                    .set_decider(Some(GameMatch::decider(DECIDER_MATCH_ID.to_string(), a, b)));
            }
        }
        None => {
            if tournament.ledger.decider().is_some() {
                log::info!("Tie for first resolved; discarding decider");
                tournament.ledger.set_decider(None);
            }
        }
    }
}
