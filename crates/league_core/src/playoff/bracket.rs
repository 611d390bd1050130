//! Fixed-topology single-elimination advancement.
//!
//! The topology is an explicit static table from (round, match number) to
//! (next round, next match number, slot), not arithmetic on match-number
//! parity. The table is auditable at a glance and extending it to a larger
//! bracket is a matter of adding rows.
//!
//! Advancement is idempotent per source match: re-running it for the same
//! completed match writes the same winner into the same slot. Re-running
//! after a score correction overwrites the previously propagated winner,
//! which is intentional (corrections must flow forward), but a bracket can
//! be transiently inconsistent if the next round was already played when
//! the correction lands. That window is documented, not guarded against.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LeagueError, Result};
use crate::models::{BracketSlot, PlayoffMatch, PlayoffRound, SeasonId, TeamRef};

/// Where a round winner goes: the target match and which side it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTarget {
    pub round: PlayoffRound,
    pub match_number: u8,
    pub slot: BracketSlot,
}

/// The bracket wiring. Odd-numbered sources feed the home slot of their
/// target, even-numbered sources the away slot.
static ADVANCEMENT_TABLE: Lazy<HashMap<(PlayoffRound, u8), SlotTarget>> = Lazy::new(|| {
    use BracketSlot::{Away, Home};
    use PlayoffRound::{Final, Quarterfinal, Semifinal};

    HashMap::from([
        ((Quarterfinal, 1), SlotTarget { round: Semifinal, match_number: 1, slot: Home }),
        ((Quarterfinal, 2), SlotTarget { round: Semifinal, match_number: 1, slot: Away }),
        ((Quarterfinal, 3), SlotTarget { round: Semifinal, match_number: 2, slot: Home }),
        ((Quarterfinal, 4), SlotTarget { round: Semifinal, match_number: 2, slot: Away }),
        ((Semifinal, 1), SlotTarget { round: Final, match_number: 1, slot: Home }),
        ((Semifinal, 2), SlotTarget { round: Final, match_number: 1, slot: Away }),
    ])
});

/// Look up where the winner of (round, match_number) advances to.
/// `None` for the final: there is nowhere further to go.
pub fn advancement_target(round: PlayoffRound, match_number: u8) -> Option<SlotTarget> {
    ADVANCEMENT_TABLE.get(&(round, match_number)).copied()
}

/// A resolved advancement: which winner goes into which slot, and which
/// source match produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotUpdate {
    pub source_match_id: String,
    pub target: SlotTarget,
    pub winner: TeamRef,
}

/// Resolve the slot update for a completed playoff match.
///
/// Fails when the match has no resolvable winner (level score without a
/// deciding shootout) or when it is the final. The caller applies the
/// update with [`apply_slot_update`]; splitting resolution from the write
/// keeps this a pure read.
pub fn advance(completed: &PlayoffMatch) -> Result<SlotUpdate> {
    let winner = completed.winner()?.clone();
    let target = advancement_target(completed.round, completed.match_number)
        .ok_or(LeagueError::NoNextRound { round: completed.round })?;
    Ok(SlotUpdate { source_match_id: completed.id.clone(), target, winner })
}

/// Write an update's winner into its target slot within `bracket`.
///
/// Only the team slot changes; the other slot, scores and schedule fields
/// of the target match are untouched. Applying the same update twice is a
/// no-op; applying an update with a different winner (score correction)
/// overwrites the slot.
pub fn apply_slot_update(update: &SlotUpdate, bracket: &mut [PlayoffMatch]) -> Result<()> {
    let target = bracket
        .iter_mut()
        .find(|m| m.round == update.target.round && m.match_number == update.target.match_number)
        .ok_or(LeagueError::MissingBracketTarget {
            round: update.target.round,
            match_number: update.target.match_number,
        })?;

    if target.slot_team(update.target.slot) != Some(&update.winner) {
        tracing::debug!(
            source = %update.source_match_id,
            target = %target.id,
            slot = ?update.target.slot,
            winner = %update.winner.id,
            "propagating playoff winner"
        );
        target.set_slot_team(update.target.slot, update.winner.clone());
    }
    Ok(())
}

/// Create the 7 empty bracket shells for a season: quarterfinals 1-4,
/// semifinals 1-2 and the final, all slots TBD. Ids are minted here.
pub fn initialize_bracket(season: &SeasonId) -> Vec<PlayoffMatch> {
    let rounds = [PlayoffRound::Quarterfinal, PlayoffRound::Semifinal, PlayoffRound::Final];
    rounds
        .iter()
        .flat_map(|&round| {
            (1..=round.match_count()).map(move |match_number| PlayoffMatch {
                id: Uuid::new_v4().to_string(),
                season: season.clone(),
                round,
                match_number,
                home_team: None,
                away_team: None,
                score: None,
                penalties: None,
                is_completed: false,
            })
        })
        .collect()
}
