//! Standings pipeline: aggregation, tie-break resolution, manual overlay.
//!
//! The three stages are pure functions over explicit inputs and compose in
//! order: `calculator::recompute_all` produces raw rows, `tiebreak::order`
//! turns them into a strict automatic order, `overlay::apply_manual_ranks`
//! merges administrator-fixed positions on top.

pub mod calculator;
pub mod overlay;
pub mod tiebreak;


pub use calculator::{distinct_teams, recompute, recompute_all};
pub use overlay::apply_manual_ranks;
pub use tiebreak::{order, order_with_outcome, TiebreakOutcome};
