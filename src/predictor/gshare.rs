//! Gshare predictor: a table of 3-bit counters indexed by PC bits XOR'ed
//! with a global branch history register.

use std::io;

use crate::branch::{Outcome, TraceRecord};
use crate::history::HistoryRegister;
use crate::predictor::table::{pc_field, CounterTable};
use crate::predictor::TracePredictor;
use crate::report::write_table_section;
use crate::stats::SimStats;

/// Width of each prediction counter.
pub const GSHARE_CTR_BITS: u32 = 3;

/// Initial counter value (the weakest 'taken' state).
pub const GSHARE_CTR_SEED: u32 = 4;

pub struct GSharePredictor {
    pc_bits: u32,
    bhr_bits: u32,
    table: CounterTable,
    bhr: HistoryRegister,
    stats: SimStats,
}

impl GSharePredictor {
    /// Create a predictor with a `2^pc_bits`-entry table and a
    /// `bhr_bits`-wide history register. Requires `bhr_bits <= pc_bits`.
    pub fn new(pc_bits: u32, bhr_bits: u32) -> Self {
        assert!(bhr_bits <= pc_bits, "bhr_bits must not exceed pc_bits");
        tracing::debug!(pc_bits, bhr_bits, "building gshare predictor");
        Self {
            pc_bits,
            bhr_bits,
            table: CounterTable::new(pc_bits, GSHARE_CTR_BITS, GSHARE_CTR_SEED),
            bhr: HistoryRegister::new(bhr_bits as usize),
            stats: SimStats::new(),
        }
    }

    /// Derive the table index for a branch address.
    ///
    /// The `pc_bits`-wide field above the two alignment bits is split into
    /// a low `bhr_bits` part and a high remainder; the low part is XOR'ed
    /// with the history register and re-concatenated below the untouched
    /// high part. The final mask is the defensive modulo of the table
    /// size; with `bhr_bits <= pc_bits` the concatenation is already
    /// exactly `pc_bits` wide.
    pub fn get_index(&self, pc: u32) -> usize {
        let field = pc_field(pc, self.pc_bits);
        let low_mask = (1usize << self.bhr_bits) - 1;
        let low = field & low_mask;
        let high = field >> self.bhr_bits;
        let xored = low ^ self.bhr.value();
        ((high << self.bhr_bits) | xored) & self.table.index_mask()
    }

    /// Return the prediction at some index without training anything.
    pub fn prediction_at(&self, idx: usize) -> Outcome {
        self.table.predict(idx)
    }

    /// Train the counter at some index on the actual outcome.
    pub fn update_counter(&mut self, idx: usize, outcome: Outcome) {
        self.table.update(idx, outcome);
    }

    /// Record the actual outcome in the history register. This happens for
    /// every processed record, whether or not this predictor's counter was
    /// the one trained.
    pub fn update_history(&mut self, outcome: Outcome) {
        self.bhr.shift_in(outcome);
    }

    pub fn pc_bits(&self) -> u32 {
        self.pc_bits
    }

    pub fn bhr_bits(&self) -> u32 {
        self.bhr_bits
    }

    pub fn history(&self) -> &HistoryRegister {
        &self.bhr
    }

    pub fn table(&self) -> &CounterTable {
        &self.table
    }
}

impl TracePredictor for GSharePredictor {
    fn name(&self) -> &'static str {
        "gshare"
    }

    fn predict_one(&mut self, record: &TraceRecord) {
        let idx = self.get_index(record.pc);
        let prediction = self.table.predict(idx);
        self.stats.record(prediction == record.outcome);
        self.table.update(idx, record.outcome);
        self.update_history(record.outcome);
    }

    fn stats(&self) -> &SimStats {
        &self.stats
    }

    fn config_string(&self) -> String {
        format!("gshare {} {}", self.pc_bits, self.bhr_bits)
    }

    fn write_final_state(&self, w: &mut dyn io::Write) -> io::Result<()> {
        write_table_section(w, "GSHARE", self.table.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_with_zero_history_is_the_pc_field() {
        let p = GSharePredictor::new(4, 2);
        assert_eq!(p.get_index(0b1011 << 2), 0b1011);
    }

    #[test]
    fn index_xors_only_the_low_field() {
        let mut p = GSharePredictor::new(4, 2);
        // Force the register to 0b10 (newest outcome at the MSB).
        p.update_history(Outcome::N);
        p.update_history(Outcome::T);
        assert_eq!(p.history().value(), 0b10);

        // field 1011: high 10 stays, low 11 ^ 10 = 01.
        assert_eq!(p.get_index(0b1011 << 2), 0b1001);
    }

    #[test]
    fn history_changes_the_prediction_path() {
        let mut p = GSharePredictor::new(4, 2);
        let pc = 0b0011 << 2;

        // Drive index 0b0011 to a strong not-taken counter while the
        // register still reads zero.
        for _ in 0..4 {
            let idx = p.get_index(pc);
            p.update_counter(idx, Outcome::N);
        }
        assert_eq!(p.prediction_at(p.get_index(pc)), Outcome::N);

        // A taken outcome flips a register bit; the same address now maps
        // to a fresh counter that predicts taken.
        p.update_history(Outcome::T);
        assert_ne!(p.get_index(pc), 0b0011);
        assert_eq!(p.prediction_at(p.get_index(pc)), Outcome::T);
    }

    #[test]
    fn history_updates_on_every_record() {
        let mut p = GSharePredictor::new(5, 3);
        p.predict_one(&TraceRecord { pc: 0x40, outcome: Outcome::T });
        p.predict_one(&TraceRecord { pc: 0x40, outcome: Outcome::N });
        p.predict_one(&TraceRecord { pc: 0x40, outcome: Outcome::T });
        assert_eq!(p.history().value(), 0b101);
    }

    #[test]
    fn zero_width_history_degenerates_to_bimodal_indexing() {
        let mut p = GSharePredictor::new(4, 0);
        p.update_history(Outcome::T);
        assert_eq!(p.get_index(0b1011 << 2), 0b1011);
    }
}
