//! Reveal planning for the presentation layer
//!
//! The engine has already applied an [`Outcome`] by the time it gets here.
//! This module only works out where the wheel should stop and when the
//! result should be shown; the timer itself belongs to whoever implements
//! [`RevealScheduler`].

use std::collections::VecDeque;

use rand::Rng;

use crate::settings::WheelSettings;
use crate::sim::Outcome;

/// Angular width of one slice in degrees
pub fn slice_step(slice_count: usize) -> f32 {
    360.0 / slice_count.max(1) as f32
}

/// Centre of slice `index`, degrees clockwise from the pointer
pub fn slice_center_angle(index: usize, slice_count: usize) -> f32 {
    (index as f32 + 0.5) * slice_step(slice_count)
}

/// Where and how long to spin for one outcome
#[derive(Debug, Clone, PartialEq)]
pub struct RevealPlan {
    pub outcome: Outcome,
    /// Total rotation in degrees (slice centre plus extra full turns)
    pub final_angle: f32,
    /// Wheel angle after the spin settles, in [0, 360)
    pub rest_angle: f32,
    pub duration_secs: f32,
}

/// Plan the spin animation for `outcome`
pub fn plan_reveal<R: Rng>(
    outcome: Outcome,
    slice_count: usize,
    settings: &WheelSettings,
    rng: &mut R,
) -> RevealPlan {
    let (lo, hi) = settings.extra_spins_range();
    let turns = if hi > lo { rng.random_range(lo..hi) } else { lo };
    let final_angle = slice_center_angle(outcome.slice_index, slice_count) + turns * 360.0;
    RevealPlan {
        rest_angle: final_angle.rem_euclid(360.0),
        final_angle,
        duration_secs: settings.effective_spin_duration(),
        outcome,
    }
}

/// Externally owned timer that shows an outcome once its spin finishes
pub trait RevealScheduler {
    fn schedule_reveal(&mut self, plan: RevealPlan);
}

/// Pending reveals driven by frame time
///
/// Call [`TimedReveals::advance`] every frame; due plans come back in the
/// order they were scheduled.
#[derive(Debug, Default)]
pub struct TimedReveals {
    pending: VecDeque<(f32, RevealPlan)>,
}

impl TimedReveals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance the clock by `dt` seconds and return every reveal now due
    pub fn advance(&mut self, dt: f32) -> Vec<RevealPlan> {
        let dt = dt.max(0.0);
        for (remaining, _) in self.pending.iter_mut() {
            *remaining -= dt;
        }
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|(remaining, _)| *remaining <= 0.0) {
            if let Some((_, plan)) = self.pending.pop_front() {
                due.push(plan);
            }
        }
        due
    }

    /// Drop everything still pending (e.g. the view was closed)
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }
}

impl RevealScheduler for TimedReveals {
    fn schedule_reveal(&mut self, plan: RevealPlan) {
        self.pending.push_back((plan.duration_secs, plan));
    }
}
