//! Playoff bracket advancement.

pub mod bracket;

pub use bracket::{
    advance, advancement_target, apply_slot_update, initialize_bracket, SlotTarget, SlotUpdate,
};
