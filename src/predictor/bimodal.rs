//! Bimodal predictor: a table of 3-bit counters indexed by low-order PC
//! bits.

use std::io;

use crate::branch::{Outcome, TraceRecord};
use crate::predictor::table::{pc_field, CounterTable};
use crate::predictor::TracePredictor;
use crate::report::write_table_section;
use crate::stats::SimStats;

/// Width of each prediction counter.
pub const BIMODAL_CTR_BITS: u32 = 3;

/// Initial counter value (the weakest 'taken' state).
pub const BIMODAL_CTR_SEED: u32 = 4;

pub struct BimodalPredictor {
    pc_bits: u32,
    table: CounterTable,
    stats: SimStats,
}

impl BimodalPredictor {
    pub fn new(pc_bits: u32) -> Self {
        tracing::debug!(pc_bits, "building bimodal predictor");
        Self {
            pc_bits,
            table: CounterTable::new(pc_bits, BIMODAL_CTR_BITS, BIMODAL_CTR_SEED),
            stats: SimStats::new(),
        }
    }

    /// Derive the table index for a branch address: the `pc_bits` low
    /// bits above the two alignment bits.
    pub fn get_index(&self, pc: u32) -> usize {
        pc_field(pc, self.pc_bits)
    }

    /// Return the prediction at some index without training anything.
    pub fn prediction_at(&self, idx: usize) -> Outcome {
        self.table.predict(idx)
    }

    /// Train the counter at some index on the actual outcome.
    pub fn update_counter(&mut self, idx: usize, outcome: Outcome) {
        self.table.update(idx, outcome);
    }

    pub fn pc_bits(&self) -> u32 {
        self.pc_bits
    }

    pub fn table(&self) -> &CounterTable {
        &self.table
    }
}

impl TracePredictor for BimodalPredictor {
    fn name(&self) -> &'static str {
        "bimodal"
    }

    fn predict_one(&mut self, record: &TraceRecord) {
        let idx = self.get_index(record.pc);
        let prediction = self.table.predict(idx);
        self.stats.record(prediction == record.outcome);
        self.table.update(idx, record.outcome);
    }

    fn stats(&self) -> &SimStats {
        &self.stats
    }

    fn config_string(&self) -> String {
        format!("bimodal {}", self.pc_bits)
    }

    fn write_final_state(&self, w: &mut dyn io::Write) -> io::Result<()> {
        write_table_section(w, "BIMODAL", self.table.values())
    }
}
