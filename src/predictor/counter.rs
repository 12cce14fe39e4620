//! Implementation of a saturating counter.

use crate::branch::Outcome;

/// An n-bit saturating counter used to follow the behavior of a branch.
///
/// The counter clamps at `2^width - 1` and 0 instead of wrapping, and
/// predicts taken whenever its value is at or above the midpoint
/// `2^(width - 1)`.
#[derive(Clone, Copy, Debug)]
pub struct SaturatingCounter {
    value: u32,
    width: u32,
}

impl SaturatingCounter {
    pub fn new(width: u32, initial: u32) -> Self {
        assert!(width >= 1 && width < u32::BITS, "invalid counter width {}", width);
        let res = Self { value: initial, width };
        assert!(initial <= res.max_value());
        res
    }

    /// Create a counter initialized to its midpoint (the weakest 'taken'
    /// state).
    pub fn at_midpoint(width: u32) -> Self {
        Self::new(width, 1 << (width - 1))
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max_value(&self) -> u32 {
        (1 << self.width) - 1
    }

    /// The smallest value that predicts 'taken'.
    pub fn midpoint(&self) -> u32 {
        1 << (self.width - 1)
    }

    pub fn predict(&self) -> Outcome {
        (self.value >= self.midpoint()).into()
    }

    pub fn increment(&mut self) {
        self.value = (self.value + 1).min(self.max_value());
    }

    pub fn decrement(&mut self) {
        self.value = self.value.saturating_sub(1);
    }

    /// Train on the actual outcome: +1 for taken, -1 for not-taken.
    pub fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => self.increment(),
            Outcome::N => self.decrement(),
        }
    }
}
