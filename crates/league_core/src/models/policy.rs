//! Points policy configuration.
//!
//! Supplied by the external settings store and passed through explicitly.
//! The core has no built-in default: the conventional 3/1/0 is available as
//! a named constructor for tests and documentation, but callers must always
//! provide a policy.

use serde::{Deserialize, Serialize};

use super::MatchOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsPolicy {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl PointsPolicy {
    /// The conventional 3/1/0 policy. Test/documentation convenience only.
    pub fn classic() -> Self {
        Self { win: 3, draw: 1, loss: 0 }
    }

    pub fn points_for(&self, outcome: MatchOutcome) -> u32 {
        match outcome {
            MatchOutcome::Win => self.win,
            MatchOutcome::Draw => self.draw,
            MatchOutcome::Loss => self.loss,
        }
    }
}
