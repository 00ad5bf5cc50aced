//! Match ledger: owns every match of the current schedule plus the optional decider.

use crate::models::game::{GameMatch, MatchId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Id of the round-robin decider match.
pub const DECIDER_MATCH_ID: &str = "final_match";

/// Serialized shape of the ledger; the id index is rebuilt on load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct LedgerSnapshot {
    matches: Vec<GameMatch>,
    #[serde(default)]
    decider: Option<GameMatch>,
}

/// Arena of matches in schedule order with an id index for bracket lookups.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "LedgerSnapshot", into = "LedgerSnapshot")]
pub struct MatchLedger {
    matches: Vec<GameMatch>,
    index: HashMap<MatchId, usize>,
    decider: Option<GameMatch>,
}

impl From<LedgerSnapshot> for MatchLedger {
    fn from(snapshot: LedgerSnapshot) -> Self {
        let mut ledger = MatchLedger::from_matches(snapshot.matches);
        ledger.decider = snapshot.decider;
        ledger
    }
}

impl From<MatchLedger> for LedgerSnapshot {
    fn from(ledger: MatchLedger) -> Self {
        Self {
            matches: ledger.matches,
            decider: ledger.decider,
        }
    }
}

impl MatchLedger {
    /// Build a ledger from a freshly generated schedule. No decider.
    pub fn from_matches(matches: Vec<GameMatch>) -> Self {
        let index = matches
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id.clone(), i))
            .collect();
        Self {
            matches,
            index,
            decider: None,
        }
    }

    /// Scheduled matches (decider excluded), in schedule order.
    pub fn matches(&self) -> &[GameMatch] {
        &self.matches
    }

    pub fn decider(&self) -> Option<&GameMatch> {
        self.decider.as_ref()
    }

    pub fn set_decider(&mut self, decider: Option<GameMatch>) {
        self.decider = decider;
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Scheduled match by id (decider excluded).
    pub fn get(&self, id: &str) -> Option<&GameMatch> {
        self.index.get(id).and_then(|&i| self.matches.get(i))
    }

    /// Scheduled match by id (decider excluded).
    pub fn get_mut(&mut self, id: &str) -> Option<&mut GameMatch> {
        let i = *self.index.get(id)?;
        self.matches.get_mut(i)
    }

    /// Any match by id, the decider included.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut GameMatch> {
        if let Some(&i) = self.index.get(id) {
            return self.matches.get_mut(i);
        }
        self.decider.as_mut().filter(|d| d.id == id)
    }

    /// Any match by id, the decider included.
    pub fn find(&self, id: &str) -> Option<&GameMatch> {
        self.get(id)
            .or_else(|| self.decider.as_ref().filter(|d| d.id == id))
    }

    /// Every scheduled match has both scores. False for an empty schedule.
    pub fn all_completed(&self) -> bool {
        !self.matches.is_empty() && self.matches.iter().all(|m| m.completed)
    }

    pub fn completed_count(&self) -> usize {
        self.matches.iter().filter(|m| m.completed).count()
    }

    /// The elimination match nobody advances out of.
    pub fn terminal_match(&self) -> Option<&GameMatch> {
        self.matches
            .iter()
            .find(|m| m.is_elimination() && m.next_match().is_none())
    }

    /// Drop every match and the decider.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
