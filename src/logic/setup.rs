//! Setup phase: schedule generation and starting the tournament.

use crate::logic::advancement::resolve_first_round_byes;
use crate::logic::bracket::generate_bracket_matches;
use crate::logic::finals::update_decider;
use crate::logic::round_robin::generate_round_robin_matches;
use crate::models::{MatchLedger, Tournament, TournamentError, TournamentState, TournamentType};
use rand::Rng;

/// Replace the ledger with a fresh schedule for the configured format.
///
/// Any previous matches, scores and decider are discarded. On error nothing changes.
pub fn generate_schedule<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    tournament.config.validate()?;
    let config = &tournament.config;
    let ledger = match config.tournament_type {
        TournamentType::RoundRobin => MatchLedger::from_matches(generate_round_robin_matches(
            &tournament.teams,
            config.cycles,
            config.shuffle_pairs,
            rng,
        )?),
        TournamentType::Elimination => {
            let matches = generate_bracket_matches(&tournament.teams, rng)?;
            let mut ledger = MatchLedger::from_matches(matches);
            resolve_first_round_byes(&mut ledger);
            ledger
        }
    };
    log::info!(
        "Generated {:?} schedule with {} matches for {} teams",
        config.tournament_type,
        ledger.len(),
        tournament.teams.len()
    );
    tournament.ledger = ledger;
    update_decider(tournament);
    Ok(())
}

/// Start the tournament: need 2 teams. Generates the schedule unless one is already kept
/// from before going back to setup.
pub fn start_tournament<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    if tournament.teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams { required: 2 });
    }
    if tournament.ledger.is_empty() {
        generate_schedule(tournament, rng)?;
    } else {
        // Rules such as `create_final` may have changed while in setup.
        update_decider(tournament);
    }
    tournament.state = TournamentState::Active;
    log::info!("Tournament {} started", tournament.id);
    Ok(())
}

/// Throw away the current schedule and scores and generate a new one. Leaves the
/// tournament active.
pub fn regenerate_schedule<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams { required: 2 });
    }
    generate_schedule(tournament, rng)?;
    tournament.state = TournamentState::Active;
    Ok(())
}
