//! Score and combo bookkeeping
//!
//! The multiplier is a staircase over the current combo. Awards use the
//! multiplier in effect *before* the success is counted, so the bigger
//! multiplier first pays out on the pass after the threshold is reached.

use crate::consts::*;
use crate::sim::state::ScoreState;

/// Staircase multiplier for a given combo
pub fn multiplier_for_combo(combo: u32) -> f32 {
    if combo >= COMBO_TIER_TWO {
        MULTIPLIER_TIER_TWO
    } else if combo >= COMBO_TIER_ONE {
        MULTIPLIER_TIER_ONE
    } else {
        MULTIPLIER_BASE
    }
}

/// Apply one successful gate pass. Order matters: award with the current
/// multiplier, then extend the combo, then recompute the multiplier.
pub fn apply_gate_success(score: &mut ScoreState) {
    score.score += score.multiplier.floor() as u32;
    score.combo += 1;
    score.multiplier = multiplier_for_combo(score.combo);
}
