//! Branch history register.

use bitvec::prelude::*;

use crate::branch::Outcome;

/// A fixed-width shift register tracking the most recent branch outcomes.
///
/// Bit `len - 1` holds the newest outcome and bit 0 the oldest; inserting
/// an outcome shifts every bit down by one and drops the oldest. The
/// register value (for XOR indexing) reads the bits with index 0 as the
/// least-significant position.
pub struct HistoryRegister {
    data: BitVec<usize, Lsb0>,
    len: usize,
}

// NOTE: This *reverses* the bits so that the leftmost character is the
// newest (most-significant) outcome and the rightmost is the oldest.
impl std::fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.as_bitslice().iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl HistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return the register contents as an integer.
    pub fn value(&self) -> usize {
        if self.len == 0 {
            return 0;
        }
        self.data.load::<usize>()
    }

    /// Record an outcome: shift the register down by one bit (dropping the
    /// oldest outcome) and insert the new outcome at the top.
    pub fn shift_in(&mut self, outcome: Outcome) {
        match self.len {
            0 => {}
            1 => self.data.set(0, outcome.into()),
            _ => {
                self.data.shift_left(1);
                self.data.set(self.len - 1, outcome.into());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_all_zero() {
        let bhr = HistoryRegister::new(4);
        assert_eq!(bhr.len(), 4);
        assert_eq!(bhr.value(), 0);
    }

    #[test]
    fn newest_outcome_lands_at_msb() {
        let mut bhr = HistoryRegister::new(3);
        bhr.shift_in(Outcome::T);
        assert_eq!(bhr.value(), 0b100);
        bhr.shift_in(Outcome::N);
        assert_eq!(bhr.value(), 0b010);
        bhr.shift_in(Outcome::T);
        assert_eq!(bhr.value(), 0b101);
    }

    #[test]
    fn oldest_outcome_is_dropped() {
        let mut bhr = HistoryRegister::new(2);
        bhr.shift_in(Outcome::T);
        bhr.shift_in(Outcome::T);
        assert_eq!(bhr.value(), 0b11);
        bhr.shift_in(Outcome::N);
        bhr.shift_in(Outcome::N);
        assert_eq!(bhr.value(), 0b00);
    }

    #[test]
    fn display_puts_newest_first() {
        let mut bhr = HistoryRegister::new(4);
        bhr.shift_in(Outcome::T);
        assert_eq!(bhr.to_string(), "1000");
    }

    #[test]
    fn single_bit_register_tracks_last_outcome() {
        let mut bhr = HistoryRegister::new(1);
        bhr.shift_in(Outcome::T);
        assert_eq!(bhr.value(), 1);
        bhr.shift_in(Outcome::N);
        assert_eq!(bhr.value(), 0);
    }

    #[test]
    fn zero_width_register_is_inert() {
        let mut bhr = HistoryRegister::new(0);
        bhr.shift_in(Outcome::T);
        assert_eq!(bhr.value(), 0);
    }
}
