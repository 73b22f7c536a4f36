//! Random sources for craft outcome rolls.

use std::collections::VecDeque;

/// Source of uniform values in `[0, 1)`, consulted once per craft attempt.
pub trait RandomSource {
    /// Draws the next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for fastrand::Rng {
    fn next_unit(&mut self) -> f64 {
        self.f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Always returns the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRoll(pub f64);

impl RandomSource for FixedRoll {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed sequence of values, then repeats the last one.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    rolls: VecDeque<f64>,
    last: f64,
}

impl ScriptedRolls {
    /// Creates a source that yields `rolls` in order.
    #[must_use]
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            last: 0.0,
        }
    }

    /// Number of scripted values not drawn yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        if let Some(roll) = self.rolls.pop_front() {
            self.last = roll;
        }
        self.last
    }
}
