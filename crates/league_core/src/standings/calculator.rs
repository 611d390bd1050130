//! Per-team aggregation of match results into Standing rows.
//!
//! Recomputation is a full replace: every call folds the complete match set
//! from zero, so running it twice over the same matches yields bit-identical
//! rows. Nothing is ever merged into a previously stored Standing.

use rayon::prelude::*;

use crate::models::{
    MatchOutcome, MatchRecord, PointsPolicy, SeasonId, Standing, TeamRef,
};

/// Rebuild the Standing row for one team from scratch.
///
/// Only matches in `season` that involve `team`, are flagged completed and
/// carry a recorded score contribute. A match flagged completed without a
/// score is skipped as a data-entry anomaly; it is logged, not raised, so
/// one bad row cannot take down a whole season's table.
pub fn recompute(
    team: &TeamRef,
    season: &str,
    matches: &[MatchRecord],
    policy: &PointsPolicy,
) -> Standing {
    let mut standing = Standing::empty(team.clone(), season);

    for m in matches.iter().filter(|m| m.season == season && m.involves(&team.id)) {
        if !m.counts_for_standings() {
            if m.is_completed {
                tracing::warn!(
                    match_id = %m.id,
                    team = %team.id,
                    "completed match has no recorded score; skipped from aggregation"
                );
            }
            continue;
        }
        // involves() held and the match counts, so both lookups succeed.
        let Some((scored, conceded)) = m.goals_for(&team.id) else { continue };
        let Some(outcome) = m.outcome_for(&team.id) else { continue };

        standing.played += 1;
        standing.goals_for += scored;
        standing.goals_against += conceded;
        match outcome {
            MatchOutcome::Win => standing.won += 1,
            MatchOutcome::Draw => standing.drawn += 1,
            MatchOutcome::Loss => standing.lost += 1,
        }
        standing.points += policy.points_for(outcome);
    }

    standing
}

/// Every distinct team referenced by the season's matches, ordered by id.
pub fn distinct_teams(season: &str, matches: &[MatchRecord]) -> Vec<TeamRef> {
    let mut teams: Vec<TeamRef> = Vec::new();
    for m in matches.iter().filter(|m| m.season == season) {
        for team in [&m.home_team, &m.away_team] {
            if !teams.iter().any(|t| t.id == team.id) {
                teams.push(team.clone());
            }
        }
    }
    teams.sort_by(|a, b| a.id.cmp(&b.id));
    teams
}

/// Recompute Standing rows for every team in `teams`.
///
/// Teams share no mutable state, so the per-team recomputes run as a
/// parallel map. The output is sorted by team id afterwards to keep the
/// result deterministic regardless of scheduling.
pub fn recompute_all(
    teams: &[TeamRef],
    season: &SeasonId,
    matches: &[MatchRecord],
    policy: &PointsPolicy,
) -> Vec<Standing> {
    let mut standings: Vec<Standing> = teams
        .par_iter()
        .map(|team| recompute(team, season, matches, policy))
        .collect();
    standings.sort_by(|a, b| a.team.id.cmp(&b.team.id));
    standings
}
