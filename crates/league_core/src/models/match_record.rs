//! Completed-match input records.
//!
//! `MatchRecord` is the only input the standings pipeline aggregates over.
//! The score is an explicit `Option<ScoreLine>`: 0-0 is a recorded result,
//! `None` is "not yet played / not yet entered". The two must never be
//! conflated, which is why the fields are unsigned and the absence is a
//! tagged optional rather than a sentinel.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TeamId;

/// Reference to a team as stored on a match row (id + display name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: TeamId,
    pub name: String,
}

impl TeamRef {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// A recorded final score. Goals are unsigned; a negative score is
/// unrepresentable by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub home: u32,
    pub away: u32,
}

impl ScoreLine {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    pub fn is_draw(&self) -> bool {
        self.home == self.away
    }
}

/// Which side of a match a team played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

/// Result of a match from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

/// A league match as supplied by the external match repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub season: super::SeasonId,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    /// Recorded final score, absent until entered.
    #[serde(default)]
    pub score: Option<ScoreLine>,
    pub is_completed: bool,
    pub date: NaiveDate,
}

impl MatchRecord {
    /// A match contributes to standings only when it is flagged completed
    /// AND a score has actually been recorded. A completed match without a
    /// score is a data-entry anomaly the aggregation skips.
    pub fn counts_for_standings(&self) -> bool {
        self.is_completed && self.score.is_some()
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team.id == team || self.away_team.id == team
    }

    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.home_team.id == team {
            Some(Side::Home)
        } else if self.away_team.id == team {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Goals (scored, conceded) from `team`'s perspective. `None` when the
    /// match has no countable result or the team did not play in it.
    pub fn goals_for(&self, team: &str) -> Option<(u32, u32)> {
        if !self.counts_for_standings() {
            return None;
        }
        let score = self.score?;
        match self.side_of(team)? {
            Side::Home => Some((score.home, score.away)),
            Side::Away => Some((score.away, score.home)),
        }
    }

    pub fn outcome_for(&self, team: &str) -> Option<MatchOutcome> {
        let (scored, conceded) = self.goals_for(team)?;
        Some(match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
        })
    }

    pub fn opponent_of(&self, team: &str) -> Option<&TeamRef> {
        match self.side_of(team)? {
            Side::Home => Some(&self.away_team),
            Side::Away => Some(&self.home_team),
        }
    }
}
