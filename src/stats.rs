//! Helpers for collecting statistics.

use std::collections::BTreeMap;

use bitvec::prelude::*;
use itertools::Itertools;

use crate::branch::TraceRecord;

/// Prediction counters accumulated over one simulation run.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimStats {
    predictions: usize,
    mispredictions: usize,
}

impl SimStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one committed prediction.
    pub fn record(&mut self, hit: bool) {
        self.predictions += 1;
        if !hit {
            self.mispredictions += 1;
        }
    }

    pub fn predictions(&self) -> usize {
        self.predictions
    }

    pub fn mispredictions(&self) -> usize {
        self.mispredictions
    }

    /// Return the misprediction rate in [0, 1].
    /// An empty run has a rate of zero rather than dividing by zero.
    pub fn misprediction_rate(&self) -> f64 {
        if self.predictions == 0 {
            return 0.0;
        }
        self.mispredictions as f64 / self.predictions as f64
    }
}

/// Container for per-branch statistics (indexed by program counter value).
pub struct BranchStats {
    pub data: BTreeMap<u32, BranchData>,
}

impl BranchStats {
    pub fn new() -> Self {
        Self { data: BTreeMap::new() }
    }

    /// Record one executed branch.
    pub fn record(&mut self, record: &TraceRecord) {
        let entry = self.get_mut(record.pc);
        entry.occ += 1;
        entry.pat.push(record.outcome.into());
    }

    /// Returns a mutable reference to data collected for a particular
    /// branch. Creates a new entry if one doesn't already exist.
    pub fn get_mut(&mut self, pc: u32) -> &mut BranchData {
        self.data.entry(pc).or_insert_with(BranchData::new)
    }

    /// Returns the number of unique observed branch instructions.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of branches that only occur once.
    pub fn num_single_occurence(&self) -> usize {
        self.data.values().filter(|entry| entry.occ == 1).count()
    }

    /// Returns the number of branches that are always taken.
    pub fn num_always_taken(&self) -> usize {
        self.data.values().filter(|entry| entry.is_always_taken()).count()
    }

    /// Returns the number of branches that are never taken.
    pub fn num_never_taken(&self) -> usize {
        self.data.values().filter(|entry| entry.is_never_taken()).count()
    }

    /// Returns the 'n' most frequently executed branches.
    pub fn get_common_branches(&self, n: usize) -> Vec<(u32, &BranchData)> {
        self.data
            .iter()
            .sorted_by(|x, y| x.1.occ.cmp(&y.1.occ))
            .rev()
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }
}

impl Default for BranchStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for per-branch statistics.
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: usize,

    /// Record of all observed outcomes for this branch.
    pub pat: BitVec,
}

impl BranchData {
    pub fn new() -> Self {
        Self { occ: 0, pat: BitVec::new() }
    }

    pub fn times_taken(&self) -> usize {
        self.pat.count_ones()
    }

    pub fn is_always_taken(&self) -> bool {
        self.pat.count_ones() == self.pat.len()
    }

    pub fn is_never_taken(&self) -> bool {
        self.pat.count_zeros() == self.pat.len()
    }
}

impl Default for BranchData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::Outcome;

    #[test]
    fn rate_counts_misses_only() {
        let mut stats = SimStats::new();
        stats.record(true);
        stats.record(false);
        stats.record(false);
        stats.record(true);
        assert_eq!(stats.predictions(), 4);
        assert_eq!(stats.mispredictions(), 2);
        assert!((stats.misprediction_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_run_has_zero_rate() {
        let stats = SimStats::new();
        assert_eq!(stats.predictions(), 0);
        assert_eq!(stats.mispredictions(), 0);
        assert_eq!(stats.misprediction_rate(), 0.0);
    }

    #[test]
    fn per_branch_buckets() {
        let mut stats = BranchStats::new();
        for _ in 0..3 {
            stats.record(&TraceRecord { pc: 0x40, outcome: Outcome::T });
        }
        stats.record(&TraceRecord { pc: 0x80, outcome: Outcome::N });
        stats.record(&TraceRecord { pc: 0xc0, outcome: Outcome::T });
        stats.record(&TraceRecord { pc: 0xc0, outcome: Outcome::N });

        assert_eq!(stats.num_unique_branches(), 3);
        assert_eq!(stats.num_single_occurence(), 1);
        assert_eq!(stats.num_always_taken(), 1);
        assert_eq!(stats.num_never_taken(), 1);

        let common = stats.get_common_branches(1);
        assert_eq!(common[0].0, 0x40);
        assert_eq!(common[0].1.times_taken(), 3);
    }
}
