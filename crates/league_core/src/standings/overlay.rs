//! Manual ranking overlay.
//!
//! Administrators can pin individual teams to fixed table positions. The
//! overlay merges those pins with the automatic order: pinned teams land at
//! exactly their declared rank, unpinned teams fill the remaining positions
//! in their automatic relative order. Inconsistent pin data (duplicate or
//! out-of-range ranks) is resolved deterministically and never blocks the
//! standings page.

use crate::models::Standing;

/// Merge manual ranks into an automatically ordered table.
///
/// `auto_ordered` must already be in automatic display order. The output has
/// the same length and contents; only positions change.
///
/// Rules:
/// - pinned teams are placed at their declared rank when it is in `[1, N]`
///   and unclaimed; on a duplicate rank the team with the lower declared
///   rank that sorted first wins the slot (first writer wins);
/// - remaining positions are filled with unpinned teams in order;
/// - pinned teams that lost their slot or declared an out-of-range rank are
///   appended after the unpinned teams, still deterministically.
pub fn apply_manual_ranks(auto_ordered: Vec<Standing>) -> Vec<Standing> {
    let total = auto_ordered.len();

    let mut manual: Vec<(u32, Standing)> = Vec::new();
    let mut auto: Vec<Standing> = Vec::with_capacity(total);
    for standing in auto_ordered {
        match standing.ranking.manual_rank() {
            Some(rank) => manual.push((rank, standing)),
            None => auto.push(standing),
        }
    }
    // Stable: equal ranks keep automatic order, which makes the
    // first-writer-wins rule below deterministic.
    manual.sort_by_key(|(rank, _)| *rank);

    let mut slots: Vec<Option<Standing>> = (0..total).map(|_| None).collect();
    let mut displaced: Vec<Standing> = Vec::new();
    for (rank, standing) in manual {
        let index = rank as usize;
        let target = if index >= 1 { slots.get_mut(index - 1) } else { None };
        match target {
            Some(slot) if slot.is_none() => *slot = Some(standing),
            _ => {
                tracing::warn!(
                    team = %standing.team.id,
                    rank,
                    total,
                    "manual rank invalid or already claimed; placing team best-effort"
                );
                displaced.push(standing);
            }
        }
    }

    // Unpinned teams fill the gaps front to back; displaced pinned teams
    // take whatever is left at the tail.
    let mut fill = auto.into_iter().chain(displaced);
    slots
        .into_iter()
        .map(|slot| match slot {
            Some(standing) => standing,
            // Counts always balance: empty slots == teams left in `fill`.
            None => fill.next().expect("slot fill exhausted"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RankingMode, TeamRef};

    fn auto(id: &str) -> Standing {
        Standing::empty(TeamRef::new(id, id.to_uppercase()), "2025-26")
    }

    fn pinned(id: &str, rank: u32) -> Standing {
        let mut s = auto(id);
        s.ranking = RankingMode::Manual(rank);
        s
    }

    fn ids(standings: &[Standing]) -> Vec<&str> {
        standings.iter().map(|s| s.team.id.as_str()).collect()
    }

    #[test]
    fn no_pins_is_a_passthrough() {
        let out = apply_manual_ranks(vec![auto("a"), auto("b"), auto("c")]);
        assert_eq!(ids(&out), ["a", "b", "c"]);
    }

    // Automatic order [A, B, C, D]; admin pins C to 1st. A, B, D keep their
    // relative order, shifted down.
    #[test]
    fn pinned_team_takes_its_rank_and_shifts_the_rest() {
        let out = apply_manual_ranks(vec![auto("a"), auto("b"), pinned("c", 1), auto("d")]);
        assert_eq!(ids(&out), ["c", "a", "b", "d"]);
    }

    #[test]
    fn pin_in_the_middle() {
        let out = apply_manual_ranks(vec![auto("a"), auto("b"), auto("c"), pinned("d", 2)]);
        assert_eq!(ids(&out), ["a", "d", "b", "c"]);
    }

    #[test]
    fn several_pins_land_exactly() {
        let out = apply_manual_ranks(vec![
            pinned("a", 4),
            auto("b"),
            pinned("c", 1),
            auto("d"),
        ]);
        assert_eq!(ids(&out), ["c", "b", "d", "a"]);
    }

    #[test]
    fn duplicate_rank_first_writer_wins() {
        // Both pinned to 2; "b" precedes "c" in automatic order so it takes
        // the slot, "c" is appended after the unpinned teams.
        let out = apply_manual_ranks(vec![auto("a"), pinned("b", 2), pinned("c", 2), auto("d")]);
        assert_eq!(ids(&out), ["a", "b", "d", "c"]);
    }

    #[test]
    fn out_of_range_ranks_are_appended_not_raised() {
        let out = apply_manual_ranks(vec![pinned("a", 0), auto("b"), pinned("c", 99), auto("d")]);
        assert_eq!(out.len(), 4);
        assert_eq!(ids(&out), ["b", "d", "a", "c"]);
    }

    #[test]
    fn all_teams_pinned() {
        let out = apply_manual_ranks(vec![pinned("a", 3), pinned("b", 1), pinned("c", 2)]);
        assert_eq!(ids(&out), ["b", "c", "a"]);
    }

    #[test]
    fn empty_input_is_fine() {
        assert!(apply_manual_ranks(Vec::new()).is_empty());
    }
}
