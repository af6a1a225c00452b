//! Weighted slice selection
//!
//! Bombs are pulled out of the pool on milestone levels; every remaining
//! slice keeps a strictly positive share of the draw.

use rand::Rng;

use super::progression::is_milestone;
use crate::catalog::SliceConfig;
use crate::consts::WEIGHT_EPSILON;

/// Draw weight after the epsilon floor (NaN and infinities collapse to the floor)
#[inline]
pub fn clamped_weight(weight: f32) -> f64 {
    let w = weight as f64;
    if w.is_finite() { w.max(WEIGHT_EPSILON) } else { WEIGHT_EPSILON }
}

/// Whether a slice takes part in the draw at `level`
#[inline]
pub fn is_eligible(slice: &SliceConfig, level: u32) -> bool {
    !(slice.is_bomb && is_milestone(level))
}

/// Sum of clamped weights over the eligible slices
pub fn eligible_weight(slices: &[SliceConfig], level: u32) -> f64 {
    slices
        .iter()
        .filter(|s| is_eligible(s, level))
        .map(|s| clamped_weight(s.weight))
        .sum()
}

/// Pick a slice index for `level`, or `None` if nothing is eligible
pub fn select<R: Rng>(slices: &[SliceConfig], level: u32, rng: &mut R) -> Option<usize> {
    let total = eligible_weight(slices, level);
    if total <= 0.0 {
        return None;
    }

    let roll = rng.random_range(0.0..total);
    let mut acc = 0.0;
    let mut last = None;
    for (i, slice) in slices.iter().enumerate() {
        if !is_eligible(slice, level) {
            continue;
        }
        acc += clamped_weight(slice.weight);
        if acc >= roll {
            return Some(i);
        }
        last = Some(i);
    }

    // Rounding left the roll past the final boundary
    last
}

/// Probability of each slice at `level` (0 for excluded slices)
pub fn selection_odds(slices: &[SliceConfig], level: u32) -> Vec<f64> {
    let total = eligible_weight(slices, level);
    slices
        .iter()
        .map(|s| {
            if total > 0.0 && is_eligible(s, level) {
                clamped_weight(s.weight) / total
            } else {
                0.0
            }
        })
        .collect()
}
