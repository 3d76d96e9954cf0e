//! Planning for the one-time startup sweep.

use crate::config::EntranceTiming;
use crate::ring;

/// Upper bound on how far before the real center the sweep starts.
const MAX_START_OFFSET: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct EntrancePlan {
    pub start_center: usize,
    pub target_center: usize,
    /// Duration of each single-step rotation, slowing down towards the end.
    pub step_ms: Vec<f64>,
}

impl EntrancePlan {
    pub fn new(target_center: usize, n: usize, timing: &EntranceTiming) -> Self {
        let offset = start_offset(n);
        let start_center = ring::normalize(target_center as i64 - offset as i64, n);
        let total_steps = ring::forward_distance(start_center, target_center, n);
        Self {
            start_center,
            target_center,
            step_ms: step_durations(total_steps, timing.first_step_ms, timing.last_step_ms),
        }
    }

    pub fn total_steps(&self) -> usize {
        self.step_ms.len()
    }
}

pub fn start_offset(n: usize) -> usize {
    MAX_START_OFFSET.min((n / 2).saturating_sub(1))
}

/// Linear ramp from `first_ms` to `last_ms` over `steps` entries.
pub fn step_durations(steps: usize, first_ms: f64, last_ms: f64) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![first_ms],
        _ => {
            let span = (steps - 1) as f64;
            (0..steps)
                .map(|i| first_ms + (last_ms - first_ms) * i as f64 / span)
                .collect()
        }
    }
}

/// Fade-in delay for an item `distance` steps from the start center.
#[inline]
pub fn stagger_delay(distance: f64, stagger_ms: f64) -> f64 {
    distance.abs() * stagger_ms
}
