//! Data-access boundary.
//!
//! The CRUD layer, its document database and the settings store live outside
//! this crate. The engine sees them only through these read-only traits, so
//! every computation is a pure function of what they return and can be
//! exercised without a database.

use crate::models::{MatchRecord, PointsPolicy, SeasonId, TeamRef};

/// Read-only access to recorded league matches and the team registry.
/// The core never writes match records.
pub trait MatchRepository {
    fn teams_for_season(&self, season: &str) -> Vec<TeamRef>;
    fn matches_for_season(&self, season: &str) -> Vec<MatchRecord>;
    fn matches_for_team(&self, team: &str, season: &str) -> Vec<MatchRecord>;
}

/// Pass-through configuration. The points policy must be supplied by the
/// caller's settings store; the core assumes no default.
pub trait SettingsProvider {
    fn points_policy(&self) -> PointsPolicy;
    fn active_season(&self) -> SeasonId;
}

/// In-memory backing used by tests and by embedders that keep league data
/// in process. Doubles as the reference implementation of both traits.
#[derive(Debug, Clone)]
pub struct InMemoryLeague {
    pub season: SeasonId,
    pub policy: PointsPolicy,
    pub teams: Vec<TeamRef>,
    pub matches: Vec<MatchRecord>,
}

impl InMemoryLeague {
    pub fn new(season: impl Into<SeasonId>, policy: PointsPolicy) -> Self {
        Self { season: season.into(), policy, teams: Vec::new(), matches: Vec::new() }
    }

    pub fn add_team(&mut self, team: TeamRef) -> &mut Self {
        if !self.teams.iter().any(|t| t.id == team.id) {
            self.teams.push(team);
        }
        self
    }

    pub fn add_match(&mut self, record: MatchRecord) -> &mut Self {
        self.matches.push(record);
        self
    }
}

impl MatchRepository for InMemoryLeague {
    fn teams_for_season(&self, _season: &str) -> Vec<TeamRef> {
        self.teams.clone()
    }

    fn matches_for_season(&self, season: &str) -> Vec<MatchRecord> {
        self.matches.iter().filter(|m| m.season == season).cloned().collect()
    }

    fn matches_for_team(&self, team: &str, season: &str) -> Vec<MatchRecord> {
        self.matches
            .iter()
            .filter(|m| m.season == season && m.involves(team))
            .cloned()
            .collect()
    }
}

impl SettingsProvider for InMemoryLeague {
    fn points_policy(&self) -> PointsPolicy {
        self.policy
    }

    fn active_season(&self) -> SeasonId {
        self.season.clone()
    }
}
