//! TeamStats: one row of the standings table.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};

/// Aggregated round-robin results for one team. Derived on demand, never stored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team_id: TeamId,
    pub name: String,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: i64,
    pub points_against: i64,
    pub point_diff: i64,
}

impl TeamStats {
    pub fn for_team(team: &Team) -> Self {
        Self {
            team_id: team.id,
            name: team.name.clone(),
            ..Self::default()
        }
    }

    /// Record one completed match from this team's side.
    pub fn add_result(&mut self, scored: i32, conceded: i32) {
        self.played += 1;
        self.points_for += i64::from(scored);
        self.points_against += i64::from(conceded);
        self.point_diff = self.points_for - self.points_against;
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Less => self.losses += 1,
            std::cmp::Ordering::Equal => self.ties += 1,
        }
    }
}
