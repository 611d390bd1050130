//! JSON API boundary.
//!
//! Thin, schema-versioned entry points for embedders that talk JSON rather
//! than linking the typed API: parse the request, run the pure core,
//! serialize the response. No I/O and no state kept between calls.

use serde::{Deserialize, Serialize};

use crate::error::{LeagueError, Result};
use crate::models::{
    MatchRecord, PlayoffMatch, PointsPolicy, RankingMode, SeasonId, Standing, TeamRef,
};
use crate::playoff::{bracket, SlotTarget};
use crate::standings::{apply_manual_ranks, calculator, tiebreak};
use crate::SCHEMA_VERSION;

fn check_schema(found: u8) -> Result<()> {
    if found != SCHEMA_VERSION {
        return Err(LeagueError::SchemaVersion { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

/// A manual pin carried on the request instead of on stored rows.
#[derive(Debug, Deserialize)]
pub struct ManualRankEntry {
    pub team_id: String,
    pub rank: u32,
}

#[derive(Debug, Deserialize)]
pub struct StandingsRequest {
    pub schema_version: u8,
    pub season: SeasonId,
    pub policy: PointsPolicy,
    /// Team registry. Empty means "derive from the matches".
    #[serde(default)]
    pub teams: Vec<TeamRef>,
    pub matches: Vec<MatchRecord>,
    #[serde(default)]
    pub manual_ranks: Vec<ManualRankEntry>,
}

#[derive(Debug, Serialize)]
pub struct TableRow {
    /// 1-based final display position.
    pub position: u32,
    #[serde(flatten)]
    pub standing: Standing,
    pub goal_difference: i64,
}

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    pub schema_version: u8,
    pub season: SeasonId,
    /// True when some tie was broken only by stable input order.
    pub arbitrary_order_used: bool,
    pub table: Vec<TableRow>,
}

/// Compute the final display table for one season from scratch.
pub fn order_standings_json(request: &str) -> Result<String> {
    let request: StandingsRequest = serde_json::from_str(request)?;
    check_schema(request.schema_version)?;

    let teams = if request.teams.is_empty() {
        calculator::distinct_teams(&request.season, &request.matches)
    } else {
        request.teams.clone()
    };

    let mut standings =
        calculator::recompute_all(&teams, &request.season, &request.matches, &request.policy);
    for entry in &request.manual_ranks {
        match standings.iter_mut().find(|s| s.team.id == entry.team_id) {
            Some(standing) => standing.ranking = RankingMode::Manual(entry.rank),
            None => tracing::warn!(
                team = %entry.team_id,
                "manual rank for a team absent from the computed standings"
            ),
        }
    }

    let outcome =
        tiebreak::order_with_outcome(&standings, &request.matches, &request.policy);
    let arbitrary_order_used = outcome.arbitrary_order_used;
    let final_order = apply_manual_ranks(outcome.ordered);

    let table = final_order
        .into_iter()
        .enumerate()
        .map(|(index, standing)| TableRow {
            position: index as u32 + 1,
            goal_difference: standing.goal_difference(),
            standing,
        })
        .collect();

    let response = StandingsResponse {
        schema_version: SCHEMA_VERSION,
        season: request.season,
        arbitrary_order_used,
        table,
    };
    Ok(serde_json::to_string(&response)?)
}

#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    pub schema_version: u8,
    pub bracket: Vec<PlayoffMatch>,
    pub completed_match_id: String,
}

#[derive(Debug, Serialize)]
pub struct AdvanceResponse {
    pub schema_version: u8,
    /// The bracket with the winner propagated.
    pub bracket: Vec<PlayoffMatch>,
    pub winner: TeamRef,
    pub target: SlotTarget,
}

/// Propagate one completed playoff match's winner and return the updated
/// bracket. The ambiguous-winner condition surfaces as an error here; the
/// caller must correct the result data and retry.
pub fn advance_bracket_json(request: &str) -> Result<String> {
    let request: AdvanceRequest = serde_json::from_str(request)?;
    check_schema(request.schema_version)?;

    let mut bracket_rows = request.bracket;
    let source = bracket_rows
        .iter()
        .find(|m| m.id == request.completed_match_id)
        .ok_or_else(|| LeagueError::UnknownPlayoffMatch {
            match_id: request.completed_match_id.clone(),
        })?;

    let update = bracket::advance(source)?;
    bracket::apply_slot_update(&update, &mut bracket_rows)?;

    let response = AdvanceResponse {
        schema_version: SCHEMA_VERSION,
        bracket: bracket_rows,
        winner: update.winner,
        target: update.target,
    };
    Ok(serde_json::to_string(&response)?)
}
