//! Export/import of the full tournament as a JSON file, plus a CSV standings export.

use crate::logic::tournament_standings;
use crate::models::{
    GameMatch, MatchKind, RoundLabel, TeamSlot, Tournament, TournamentError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Bumped when the file layout changes incompatibly.
pub const FORMAT_VERSION: u32 = 1;

/// Contents of an exported file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportFile {
    pub format_version: u32,
    pub exported_at: DateTime<Utc>,
    pub tournament: Tournament,
}

/// Serialize the whole session to pretty JSON.
pub fn export_json(tournament: &Tournament) -> Result<String, TournamentError> {
    let file = ExportFile {
        format_version: FORMAT_VERSION,
        exported_at: Utc::now(),
        tournament: tournament.clone(),
    };
    serde_json::to_string_pretty(&file)
        .map_err(|e| TournamentError::Storage(format!("Failed to serialize: {}", e)))
}

/// Parse and check an exported file. Nothing is touched on error.
pub fn import_json(text: &str) -> Result<Tournament, TournamentError> {
    let file: ExportFile = serde_json::from_str(text)
        .map_err(|e| TournamentError::MalformedImport(e.to_string()))?;
    if file.format_version != FORMAT_VERSION {
        return Err(TournamentError::MalformedImport(format!(
            "unsupported format version {}",
            file.format_version
        )));
    }
    validate(&file.tournament)?;
    Ok(file.tournament)
}

/// Replace `tournament` with the imported one, all or nothing.
pub fn import_into(tournament: &mut Tournament, text: &str) -> Result<(), TournamentError> {
    let imported = import_json(text)?;
    log::info!(
        "Imported tournament {} with {} teams and {} matches",
        imported.id,
        imported.teams.len(),
        imported.ledger.len()
    );
    *tournament = imported;
    Ok(())
}

/// Reject snapshots that would break lookups later on.
fn validate(tournament: &Tournament) -> Result<(), TournamentError> {
    tournament
        .config
        .validate()
        .map_err(|e| TournamentError::MalformedImport(e.to_string()))?;

    let mut team_ids = HashSet::new();
    for team in &tournament.teams {
        if !team_ids.insert(team.id) {
            return Err(TournamentError::MalformedImport(format!("duplicate team id {}", team.id)));
        }
    }

    let mut match_ids = HashSet::new();
    for m in tournament.ledger.matches().iter().chain(tournament.ledger.decider()) {
        if !match_ids.insert(m.id.as_str()) {
            return Err(TournamentError::MalformedImport(format!("duplicate match id {}", m.id)));
        }
        if m.completed != (m.score_a.is_some() && m.score_b.is_some()) {
            return Err(TournamentError::MalformedImport(format!(
                "match {} completion does not match its scores",
                m.id
            )));
        }
        for slot in [m.team_a, m.team_b] {
            if let TeamSlot::Team(id) = slot {
                if !team_ids.contains(&id) {
                    return Err(TournamentError::MalformedImport(format!(
                        "match {} references unknown team {}",
                        m.id, id
                    )));
                }
            }
        }
    }

    for m in tournament.ledger.matches() {
        if let MatchKind::Elimination { next: Some(next) } = &m.kind {
            let target = tournament.ledger.get(&next.match_id).ok_or_else(|| {
                TournamentError::MalformedImport(format!(
                    "match {} links to unknown match {}",
                    m.id, next.match_id
                ))
            })?;
            if !links_forward(m.round, target) {
                return Err(TournamentError::MalformedImport(format!(
                    "match {} links to {} which is not in the following round",
                    m.id, next.match_id
                )));
            }
        }
    }
    Ok(())
}

/// A bracket link must point at an elimination match of the next round (half the size).
fn links_forward(from: RoundLabel, target: &GameMatch) -> bool {
    match (from, target.round) {
        (RoundLabel::Bracket(size), RoundLabel::Bracket(next_size)) => {
            target.is_elimination() && size > 2 && next_size * 2 == size
        }
        _ => false,
    }
}

#[derive(Serialize)]
struct StandingsRow<'a> {
    rank: usize,
    team: &'a str,
    played: u32,
    wins: u32,
    losses: u32,
    ties: u32,
    points_for: i64,
    points_against: i64,
    point_diff: i64,
}

/// Current standings as CSV with a header row.
pub fn standings_csv(tournament: &Tournament) -> Result<String, TournamentError> {
    let standings = tournament_standings(tournament);
    let mut writer = csv::Writer::from_writer(Vec::new());
    for (i, s) in standings.iter().enumerate() {
        writer
            .serialize(StandingsRow {
                rank: i + 1,
                team: &s.name,
                played: s.played,
                wins: s.wins,
                losses: s.losses,
                ties: s.ties,
                points_for: s.points_for,
                points_against: s.points_against,
                point_diff: s.point_diff,
            })
            .map_err(|e| TournamentError::Storage(format!("Failed to write CSV: {}", e)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TournamentError::Storage(format!("Failed to write CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| TournamentError::Storage(e.to_string()))
}
