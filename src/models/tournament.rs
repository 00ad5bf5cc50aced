//! Tournament and TournamentState.

use crate::models::config::{ConfigUpdate, TournamentConfig};
use crate::models::ledger::MatchLedger;
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Not enough teams to generate a schedule.
    NotEnoughTeams { required: usize },
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Team not found in the registry.
    TeamNotFound(TeamId),
    /// Team name is empty after trimming.
    EmptyTeamName,
    /// Configuration value out of range.
    InvalidConfig(String),
    /// Imported file could not be parsed or is inconsistent.
    MalformedImport(String),
    /// Persistence backend failed.
    Storage(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughTeams { required } => {
                write!(f, "Please add at least {} teams", required)
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::EmptyTeamName => write!(f, "Team name must not be empty"),
            TournamentError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            TournamentError::MalformedImport(msg) => write!(f, "Error importing file: {}", msg),
            TournamentError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Registering teams and choosing rules.
    #[default]
    Setup,
    /// Schedule generated; scores are being entered.
    Active,
}

/// How far through the schedule we are (decider excluded).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// Rounded percentage; 0 for an empty schedule.
    pub percent: u32,
}

/// Full session state: rules, teams, matches and phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub config: TournamentConfig,
    pub teams: Vec<Team>,
    pub ledger: MatchLedger,
    pub state: TournamentState,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new(TournamentConfig::default())
    }
}

impl Tournament {
    /// Create a new tournament in Setup state with no teams.
    pub fn new(config: TournamentConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            teams: Vec::new(),
            ledger: MatchLedger::default(),
            state: TournamentState::Setup,
        }
    }

    /// Create a tournament with initial teams. Still in Setup until started.
    pub fn with_teams(teams: Vec<Team>, config: TournamentConfig) -> Self {
        Self {
            teams,
            ..Self::new(config)
        }
    }

    pub fn get_team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Register a team (Setup only). Returns the new team's id.
    ///
    /// A schedule generated before this change no longer covers the roster, so it is dropped.
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<TeamId, TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyTeamName);
        }
        let team = Team::new(name_trimmed);
        let id = team.id;
        self.teams.push(team);
        self.discard_stale_schedule();
        Ok(id)
    }

    /// Remove a team by id (Setup only). Drops any schedule generated before.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        self.discard_stale_schedule();
        Ok(())
    }

    /// Merge a partial configuration change (Setup only). Nothing changes if the result is invalid.
    /// Switching format or cycle count drops a kept schedule.
    pub fn set_configuration(&mut self, update: ConfigUpdate) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let config = update.merged_into(&self.config);
        config.validate()?;
        let reshapes_schedule = config.tournament_type != self.config.tournament_type
            || config.cycles != self.config.cycles;
        self.config = config;
        if reshapes_schedule {
            self.discard_stale_schedule();
        }
        Ok(())
    }

    /// Back to Setup. The schedule and scores are kept until the roster changes or the
    /// schedule is regenerated.
    pub fn go_back_to_setup(&mut self) -> Result<(), TournamentError> {
        if self.state != TournamentState::Active {
            return Err(TournamentError::InvalidState);
        }
        self.state = TournamentState::Setup;
        log::info!("Tournament {} back in setup", self.id);
        Ok(())
    }

    /// Wipe everything: empty roster, default rules, no matches.
    pub fn reset(&mut self) {
        let id = self.id;
        *self = Self::new(TournamentConfig::default());
        self.id = id;
    }

    /// Completed vs scheduled matches.
    pub fn progress(&self) -> Progress {
        let completed = self.ledger.completed_count();
        let total = self.ledger.len();
        let percent = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        };
        Progress {
            completed,
            total,
            percent,
        }
    }

    fn discard_stale_schedule(&mut self) {
        if !self.ledger.is_empty() {
            log::info!(
                "Setup changed; discarding existing schedule of {} matches",
                self.ledger.len()
            );
            self.ledger.clear();
        }
    }
}
