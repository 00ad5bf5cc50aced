//! Standings: fold completed round-robin matches into ranked team statistics.

use crate::models::{MatchLedger, OrderingPolicy, Team, TeamStats, Tournament};
use std::collections::HashMap;

/// Compute the standings table for `teams` from the completed round-robin matches in
/// `ledger`, sorted by `policy`.
///
/// The decider and elimination matches never count. Matches naming a team that is not
/// registered are skipped. Rows still level after the policy's keys keep registry order.
pub fn calculate_standings(
    teams: &[Team],
    ledger: &MatchLedger,
    policy: OrderingPolicy,
) -> Vec<TeamStats> {
    let mut rows: Vec<TeamStats> = teams.iter().map(TeamStats::for_team).collect();
    let position: HashMap<_, _> = rows.iter().enumerate().map(|(i, r)| (r.team_id, i)).collect();

    for m in ledger.matches().iter().filter(|m| m.completed && m.is_round_robin()) {
        let (Some(a), Some(b)) = (m.team_a.team_id(), m.team_b.team_id()) else {
            continue;
        };
        let (Some(&ia), Some(&ib)) = (position.get(&a), position.get(&b)) else {
            log::debug!("Skipping match {} with an unregistered team", m.id);
            continue;
        };
        let (Some(sa), Some(sb)) = (m.score_a, m.score_b) else {
            continue;
        };
        rows[ia].add_result(sa, sb);
        rows[ib].add_result(sb, sa);
    }

    rows.sort_by(|a, b| policy.compare(a, b));
    rows
}

/// Standings of the tournament under its configured ordering policy.
pub fn tournament_standings(tournament: &Tournament) -> Vec<TeamStats> {
    calculate_standings(&tournament.teams, &tournament.ledger, tournament.config.ordering)
}
