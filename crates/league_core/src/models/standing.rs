//! Standing rows.
//!
//! A `Standing` is a fully-replaceable projection of the match set for one
//! (team, season) pair. It is never patched incrementally; recomputation
//! rebuilds the whole row, which keeps stored and derived state from ever
//! drifting apart.

use serde::{Deserialize, Serialize};

use super::{PointsPolicy, SeasonId, TeamRef};

/// How a team is positioned in the final table.
///
/// A sum type instead of a `manually_ranked` flag plus a nullable rank: the
/// invalid state "not manually ranked but carries a rank" is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "rank", rename_all = "snake_case")]
pub enum RankingMode {
    /// Position computed from results and tie-breakers.
    Automatic,
    /// Position fixed by an administrator (1-based).
    Manual(u32),
}

impl Default for RankingMode {
    fn default() -> Self {
        RankingMode::Automatic
    }
}

impl RankingMode {
    pub fn is_manual(&self) -> bool {
        matches!(self, RankingMode::Manual(_))
    }

    pub fn manual_rank(&self) -> Option<u32> {
        match self {
            RankingMode::Manual(rank) => Some(*rank),
            RankingMode::Automatic => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub team: TeamRef,
    pub season: SeasonId,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
    #[serde(default)]
    pub ranking: RankingMode,
}

impl Standing {
    /// An empty row for a team that has no countable results yet.
    pub fn empty(team: TeamRef, season: impl Into<SeasonId>) -> Self {
        Self {
            team,
            season: season.into(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
            ranking: RankingMode::Automatic,
        }
    }

    /// Derived, never stored: recomputed on every access so it cannot go
    /// stale against `goals_for`/`goals_against`.
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Conservation checks for a recomputed row under `policy`.
    pub fn validate(&self, policy: &PointsPolicy) -> Result<(), String> {
        if self.played != self.won + self.drawn + self.lost {
            return Err(format!(
                "played/{} must equal won/{} + drawn/{} + lost/{}",
                self.played, self.won, self.drawn, self.lost
            ));
        }
        let expected =
            self.won * policy.win + self.drawn * policy.draw + self.lost * policy.loss;
        if self.points != expected {
            return Err(format!("points {} do not match policy total {}", self.points, expected));
        }
        Ok(())
    }
}
