//! Champion: overall winner once every required match is complete.

use crate::logic::standings::tournament_standings;
use crate::models::{TeamId, TeamSlot, Tournament, TournamentType};
use serde::{Deserialize, Serialize};

/// Winner of the tournament.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Champion {
    Team(TeamId),
    /// Only reachable by a bracket made of nothing but BYEs.
    Bye,
}

/// The champion, or `None` while matches that decide it are outstanding.
///
/// Round-robin: all scheduled matches complete and the decider, if any, complete with a
/// winner; the decider's winner takes it, otherwise the top of the standings.
/// Elimination: the winner of the match with no outgoing link.
pub fn champion(tournament: &Tournament) -> Option<Champion> {
    match tournament.config.tournament_type {
        TournamentType::RoundRobin => round_robin_champion(tournament),
        TournamentType::Elimination => elimination_champion(tournament),
    }
}

fn round_robin_champion(tournament: &Tournament) -> Option<Champion> {
    if !tournament.ledger.all_completed() {
        return None;
    }
    if let Some(decider) = tournament.ledger.decider() {
        // A level decider has no winner and must be replayed.
        return decider.winner()?.team_id().map(Champion::Team);
    }
    tournament_standings(tournament)
        .first()
        .map(|top| Champion::Team(top.team_id))
}

fn elimination_champion(tournament: &Tournament) -> Option<Champion> {
    match tournament.ledger.terminal_match()?.winner()? {
        TeamSlot::Team(id) => Some(Champion::Team(id)),
        TeamSlot::Bye => Some(Champion::Bye),
        TeamSlot::Unset => None,
    }
}
