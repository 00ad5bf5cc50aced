//! Match records: team slots, scores, commentary and bracket links.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a match. Stable and human readable (`m_1_0`, `r2_m1`, `final_match`).
pub type MatchId = String;

/// Who occupies one side of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSlot {
    Team(TeamId),
    /// No opponent; the other side advances without playing.
    Bye,
    /// Not decided yet (waiting on an earlier elimination match).
    #[default]
    Unset,
}

impl TeamSlot {
    pub fn team_id(&self) -> Option<TeamId> {
        match self {
            TeamSlot::Team(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, TeamSlot::Bye)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, TeamSlot::Unset)
    }
}

/// Side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    A,
    B,
}

/// Where the winner of an elimination match goes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NextMatch {
    pub match_id: MatchId,
    pub slot: Slot,
}

/// What kind of match this is; bracket links only exist on elimination matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    RoundRobin,
    Elimination { next: Option<NextMatch> },
    /// Extra match between the top two after a level round-robin.
    Decider,
}

/// Round a match belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundLabel {
    /// Round-robin cycle, 1-based.
    Cycle(u32),
    /// Elimination round, by number of teams entering it.
    Bracket(usize),
    Decider,
}

impl fmt::Display for RoundLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundLabel::Cycle(c) => write!(f, "Cycle {}", c),
            RoundLabel::Bracket(2) => write!(f, "Finals"),
            RoundLabel::Bracket(4) => write!(f, "Semi-Finals"),
            RoundLabel::Bracket(8) => write!(f, "Quarter-Finals"),
            RoundLabel::Bracket(size) => write!(f, "Round of {}", size),
            RoundLabel::Decider => write!(f, "Final"),
        }
    }
}

/// A single match. `completed` holds exactly when both scores are set.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub round: RoundLabel,
    pub team_a: TeamSlot,
    pub team_b: TeamSlot,
    pub score_a: Option<i32>,
    pub score_b: Option<i32>,
    pub completed: bool,
    pub commentary_a: Option<String>,
    pub commentary_b: Option<String>,
    pub kind: MatchKind,
}

impl GameMatch {
    fn unplayed(
        id: MatchId,
        round: RoundLabel,
        team_a: TeamSlot,
        team_b: TeamSlot,
        kind: MatchKind,
    ) -> Self {
        Self {
            id,
            round,
            team_a,
            team_b,
            score_a: None,
            score_b: None,
            completed: false,
            commentary_a: None,
            commentary_b: None,
            kind,
        }
    }

    /// Round-robin match between two registered teams.
    pub fn round_robin(id: MatchId, cycle: u32, team_a: TeamId, team_b: TeamId) -> Self {
        Self::unplayed(
            id,
            RoundLabel::Cycle(cycle),
            TeamSlot::Team(team_a),
            TeamSlot::Team(team_b),
            MatchKind::RoundRobin,
        )
    }

    /// Elimination match with empty slots.
    pub fn elimination(id: MatchId, round_size: usize, next: Option<NextMatch>) -> Self {
        Self::unplayed(
            id,
            RoundLabel::Bracket(round_size),
            TeamSlot::Unset,
            TeamSlot::Unset,
            MatchKind::Elimination { next },
        )
    }

    /// Decider between the top two of a round-robin.
    pub fn decider(id: MatchId, team_a: TeamId, team_b: TeamId) -> Self {
        Self::unplayed(
            id,
            RoundLabel::Decider,
            TeamSlot::Team(team_a),
            TeamSlot::Team(team_b),
            MatchKind::Decider,
        )
    }

    pub fn slot(&self, slot: Slot) -> TeamSlot {
        match slot {
            Slot::A => self.team_a,
            Slot::B => self.team_b,
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut TeamSlot {
        match slot {
            Slot::A => &mut self.team_a,
            Slot::B => &mut self.team_b,
        }
    }

    pub fn next_match(&self) -> Option<&NextMatch> {
        match &self.kind {
            MatchKind::Elimination { next } => next.as_ref(),
            _ => None,
        }
    }

    pub fn is_elimination(&self) -> bool {
        matches!(self.kind, MatchKind::Elimination { .. })
    }

    pub fn is_round_robin(&self) -> bool {
        matches!(self.kind, MatchKind::RoundRobin)
    }

    /// Both slots are known and at least one is a BYE.
    pub fn is_bye_match(&self) -> bool {
        !self.team_a.is_unset()
            && !self.team_b.is_unset()
            && (self.team_a.is_bye() || self.team_b.is_bye())
    }

    /// Winning side of a completed match.
    ///
    /// A BYE always loses to a team; BYE vs BYE yields `Bye` so the cascade keeps
    /// moving. Otherwise the higher score wins and a level score has no winner.
    /// Matches with an `Unset` slot never have a winner.
    pub fn winner(&self) -> Option<TeamSlot> {
        if !self.completed || self.team_a.is_unset() || self.team_b.is_unset() {
            return None;
        }
        match (self.team_a, self.team_b) {
            (TeamSlot::Bye, other) | (other, TeamSlot::Bye) => return Some(other),
            _ => {}
        }
        let (a, b) = (self.score_a?, self.score_b?);
        if a > b {
            Some(self.team_a)
        } else if b > a {
            Some(self.team_b)
        } else {
            None
        }
    }
}
