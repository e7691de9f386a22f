//! Scripted random source for driving exact branches in tests.
//!
//! NOTE: Available in all builds to support integration testing,
//! but should only be used in test code.

use std::collections::VecDeque;

use super::RandomSource;

/// Float returned once the float script is exhausted.
///
/// High enough that no yearly event fires, no stochastic death occurs
/// (the largest possible death probability is 0.17) and education resolves
/// to high school.
pub const EXHAUSTED_FLOAT: f64 = 0.999;

/// Replays queued draws in order.
///
/// Float draws come from one queue, integer and index draws from another.
/// Integer draws are clamped into the requested range; once a queue runs dry,
/// floats return [`EXHAUSTED_FLOAT`] and integers return the range minimum.
///
/// # Example
/// ```
/// use life_simulator_core_rs::rng::{RandomSource, ScriptedRng};
///
/// let mut rng = ScriptedRng::new().floats([0.25]).ints([2]);
/// assert_eq!(rng.next_f64(), 0.25);
/// assert_eq!(rng.range_inclusive(0, 2), 2);
/// assert_eq!(rng.range_inclusive(0, 2), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    floats: VecDeque<f64>,
    ints: VecDeque<i64>,
    floats_drawn: usize,
    ints_drawn: usize,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append float draws to the script
    pub fn floats(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.floats.extend(values);
        self
    }

    /// Append integer/index draws to the script
    pub fn ints(mut self, values: impl IntoIterator<Item = i64>) -> Self {
        self.ints.extend(values);
        self
    }

    /// Total draws served so far as (floats, ints)
    pub fn draws(&self) -> (usize, usize) {
        (self.floats_drawn, self.ints_drawn)
    }
}

impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        self.floats_drawn += 1;
        self.floats.pop_front().unwrap_or(EXHAUSTED_FLOAT)
    }

    fn range_inclusive(&mut self, min: i64, max: i64) -> i64 {
        self.ints_drawn += 1;
        self.ints
            .pop_front()
            .map(|v| v.clamp(min, max))
            .unwrap_or(min)
    }
}
