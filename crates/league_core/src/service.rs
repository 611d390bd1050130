//! Operations exposed to the CRUD layer / UI.
//!
//! `LeagueService` wires the repository and settings boundaries to the pure
//! computation modules and owns the two projections the rest of the app
//! reads: Standing rows (fully replaceable) and the playoff bracket
//! (created once, mutated in place by advancement).

use std::collections::HashSet;

use crate::error::{LeagueError, Result};
use crate::models::{
    PlayoffMatch, RankingMode, ScoreLine, SeasonId, Standing, TeamRef,
};
use crate::playoff::{bracket, SlotUpdate};
use crate::repository::{MatchRepository, SettingsProvider};
use crate::standings::{apply_manual_ranks, calculator, tiebreak};

pub struct LeagueService<R, S> {
    repository: R,
    settings: S,
    standings: Vec<Standing>,
    bracket: Vec<PlayoffMatch>,
}

impl<R: MatchRepository, S: SettingsProvider> LeagueService<R, S> {
    pub fn new(repository: R, settings: S) -> Self {
        Self { repository, settings, standings: Vec::new(), bracket: Vec::new() }
    }

    fn season(&self) -> SeasonId {
        self.settings.active_season()
    }

    /// Current Standing projections, unordered (by team id). Use [`order`]
    /// for display order.
    ///
    /// [`order`]: LeagueService::order
    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    pub fn bracket(&self) -> &[PlayoffMatch] {
        &self.bracket
    }

    /// Rebuild one team's Standing row from its matches, replacing any
    /// stored row. The team's manual-ranking mode survives the replace;
    /// recomputation concerns results, not administration.
    pub fn recompute(&mut self, team: &TeamRef) -> Standing {
        let season = self.season();
        let matches = self.repository.matches_for_team(&team.id, &season);
        let mut standing =
            calculator::recompute(team, &season, &matches, &self.settings.points_policy());

        if let Some(existing) = self.standings.iter_mut().find(|s| s.team.id == team.id) {
            standing.ranking = existing.ranking;
            *existing = standing.clone();
        } else {
            self.standings.push(standing.clone());
            self.standings.sort_by(|a, b| a.team.id.cmp(&b.team.id));
        }
        standing
    }

    /// Rebuild every registered team's Standing row for the active season.
    ///
    /// Matches referencing teams missing from the registry still count for
    /// the registered side; the stale reference is logged and absorbed so
    /// it cannot corrupt the rest of the season's standings.
    pub fn recompute_all(&mut self) -> &[Standing] {
        let season = self.season();
        let teams = self.repository.teams_for_season(&season);
        let matches = self.repository.matches_for_season(&season);

        let registered: HashSet<&str> = teams.iter().map(|t| t.id.as_str()).collect();
        for m in &matches {
            for side in [&m.home_team, &m.away_team] {
                if !registered.contains(side.id.as_str()) {
                    tracing::warn!(
                        match_id = %m.id,
                        team = %side.id,
                        "match references a team missing from the season registry"
                    );
                }
            }
        }

        let mut fresh = calculator::recompute_all(
            &teams,
            &season,
            &matches,
            &self.settings.points_policy(),
        );
        for standing in &mut fresh {
            if let Some(existing) = self.standings.iter().find(|s| s.team.id == standing.team.id)
            {
                standing.ranking = existing.ranking;
            }
        }
        self.standings = fresh;
        &self.standings
    }

    /// Final display order for the active season: automatic order from the
    /// tie-break cascade, with manual ranks overlaid.
    pub fn order(&mut self) -> Vec<Standing> {
        if self.standings.is_empty() {
            self.recompute_all();
        }
        let matches = self.repository.matches_for_season(&self.season());
        let auto =
            tiebreak::order(&self.standings, &matches, &self.settings.points_policy());
        apply_manual_ranks(auto)
    }

    /// Pin a team to a fixed position, or return it to automatic ranking.
    /// Returns false when no Standing row exists for the team yet.
    pub fn set_manual_rank(&mut self, team_id: &str, ranking: RankingMode) -> bool {
        match self.standings.iter_mut().find(|s| s.team.id == team_id) {
            Some(standing) => {
                standing.ranking = ranking;
                true
            }
            None => {
                tracing::warn!(team = %team_id, "manual rank for a team with no standing row");
                false
            }
        }
    }

    /// Create the season's 7 bracket shells. A no-op when shells already
    /// exist, so repeated calls cannot wipe a bracket in progress.
    pub fn initialize_bracket(&mut self) {
        if self.bracket.is_empty() {
            self.bracket = bracket::initialize_bracket(&self.season());
        }
    }

    /// Record a playoff result via the external match-editing flow. The
    /// advancer itself never sets scores or completion.
    pub fn record_playoff_result(
        &mut self,
        match_id: &str,
        score: ScoreLine,
        penalties: Option<ScoreLine>,
    ) -> Result<()> {
        let m = self
            .bracket
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or_else(|| LeagueError::UnknownPlayoffMatch { match_id: match_id.to_string() })?;
        m.score = Some(score);
        m.penalties = penalties;
        m.is_completed = true;
        Ok(())
    }

    /// Propagate a completed playoff match's winner into the next round.
    pub fn advance(&mut self, match_id: &str) -> Result<SlotUpdate> {
        if self.bracket.is_empty() {
            return Err(LeagueError::BracketNotInitialized { season: self.season() });
        }
        let source = self
            .bracket
            .iter()
            .find(|m| m.id == match_id)
            .ok_or_else(|| LeagueError::UnknownPlayoffMatch { match_id: match_id.to_string() })?;
        let update = bracket::advance(source)?;
        bracket::apply_slot_update(&update, &mut self.bracket)?;
        Ok(update)
    }
}
