//! Winner advancement through the elimination tree, including BYE cascades.

use crate::models::{MatchLedger, TeamSlot};

/// Auto-complete a match that has a BYE in a filled slot, then advance its winner.
///
/// Returns true if the match was resolved. Matches with an `Unset` slot or without a
/// BYE are left alone.
pub fn resolve_bye(ledger: &mut MatchLedger, match_id: &str) -> bool {
    let m = match ledger.get_mut(match_id) {
        Some(m) => m,
        None => return false,
    };
    if !m.is_elimination() || !m.is_bye_match() {
        return false;
    }
    m.score_a = Some(0);
    m.score_b = Some(0);
    m.completed = true;
    m.commentary_a = None;
    m.commentary_b = None;
    log::debug!("Match {} resolved by bye", match_id);
    advance_winner(ledger, match_id);
    true
}

/// Write the winner of `match_id` into its linked slot and resolve the next match if
/// that slot completes a BYE pairing.
///
/// No-op for matches without a winner, the final, and links to missing matches.
pub fn advance_winner(ledger: &mut MatchLedger, match_id: &str) {
    let (winner, next) = match ledger.get(match_id) {
        Some(m) => match (m.winner(), m.next_match()) {
            (Some(winner), Some(next)) => (winner, next.clone()),
            _ => return,
        },
        None => return,
    };

    let next_match = match ledger.get_mut(&next.match_id) {
        Some(m) => m,
        None => {
            log::debug!("Match {} links to missing match {}", match_id, next.match_id);
            return;
        }
    };
    *next_match.slot_mut(next.slot) = winner;
    if let TeamSlot::Team(id) = winner {
        log::debug!("Team {} advances from {} to {}", id, match_id, next.match_id);
    }

    resolve_bye(ledger, &next.match_id);
}

/// Resolve every BYE match of the first round (matches nothing links into).
pub fn resolve_first_round_byes(ledger: &mut MatchLedger) {
    let fed: std::collections::HashSet<String> = ledger
        .matches()
        .iter()
        .filter_map(|m| m.next_match().map(|n| n.match_id.clone()))
        .collect();
    let first_round: Vec<String> = ledger
        .matches()
        .iter()
        .filter(|m| m.is_elimination() && !fed.contains(&m.id))
        .map(|m| m.id.clone())
        .collect();
    for id in first_round {
        resolve_bye(ledger, &id);
    }
}
