//! Types for implementing a table of saturating counters.

use crate::branch::Outcome;
use crate::predictor::counter::SaturatingCounter;

/// Extract the table-index field of a branch address.
///
/// The two lowest address bits are instruction alignment and are always
/// discarded; the field is the `bits`-wide run immediately above them.
pub fn pc_field(pc: u32, bits: u32) -> usize {
    debug_assert!(bits < u32::BITS);
    ((pc >> 2) as usize) & ((1usize << bits) - 1)
}

/// A fixed-size table of [SaturatingCounter] indexed by the low bits of
/// some predictor-specific index derivation.
///
/// The table holds `2^index_bits` entries, all seeded to the same value.
pub struct CounterTable {
    data: Vec<SaturatingCounter>,
}

impl CounterTable {
    pub fn new(index_bits: u32, ctr_width: u32, seed: u32) -> Self {
        let size = 1usize << index_bits;
        Self {
            data: vec![SaturatingCounter::new(ctr_width, seed); size],
        }
    }

    /// Returns the number of entries in the table.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns a bitmask corresponding to the number of entries.
    pub fn index_mask(&self) -> usize {
        debug_assert!(self.data.len().is_power_of_two());
        self.data.len() - 1
    }

    /// Return the prediction of the counter at some index.
    pub fn predict(&self, idx: usize) -> Outcome {
        self.data[idx & self.index_mask()].predict()
    }

    /// Return the raw value of the counter at some index.
    pub fn value(&self, idx: usize) -> u32 {
        self.data[idx & self.index_mask()].value()
    }

    /// Train the counter at some index on the actual outcome.
    pub fn update(&mut self, idx: usize, outcome: Outcome) {
        let mask = self.index_mask();
        self.data[idx & mask].update(outcome);
    }

    pub fn increment(&mut self, idx: usize) {
        let mask = self.index_mask();
        self.data[idx & mask].increment();
    }

    pub fn decrement(&mut self, idx: usize) {
        let mask = self.index_mask();
        self.data[idx & mask].decrement();
    }

    /// Iterate over the counter values, in index order.
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.data.iter().map(|c| c.value())
    }
}
