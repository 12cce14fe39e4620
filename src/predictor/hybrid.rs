//! Hybrid predictor: arbitrates between a gshare and a bimodal predictor
//! with a table of 2-bit chooser counters.

use std::io;

use crate::branch::{Outcome, TraceRecord};
use crate::predictor::bimodal::BimodalPredictor;
use crate::predictor::gshare::GSharePredictor;
use crate::predictor::table::{pc_field, CounterTable};
use crate::predictor::TracePredictor;
use crate::report::write_table_section;
use crate::stats::SimStats;

/// Width of each chooser counter.
pub const CHOOSER_CTR_BITS: u32 = 2;

/// Initial chooser value (weakly biased toward bimodal).
pub const CHOOSER_CTR_SEED: u32 = 1;

/// Chooser values at or above this select gshare.
pub const CHOOSER_GSHARE_THRESHOLD: u32 = 2;

pub struct HybridPredictor {
    chooser_bits: u32,
    chooser: CounterTable,
    gshare: GSharePredictor,
    bimodal: BimodalPredictor,
    stats: SimStats,
}

impl HybridPredictor {
    pub fn new(chooser_bits: u32, gshare_bits: u32, bhr_bits: u32, bimodal_bits: u32) -> Self {
        tracing::debug!(
            chooser_bits,
            gshare_bits,
            bhr_bits,
            bimodal_bits,
            "building hybrid predictor"
        );
        Self {
            chooser_bits,
            chooser: CounterTable::new(chooser_bits, CHOOSER_CTR_BITS, CHOOSER_CTR_SEED),
            gshare: GSharePredictor::new(gshare_bits, bhr_bits),
            bimodal: BimodalPredictor::new(bimodal_bits),
            stats: SimStats::new(),
        }
    }

    /// Derive the chooser-table index for a branch address.
    pub fn chooser_index(&self, pc: u32) -> usize {
        pc_field(pc, self.chooser_bits)
    }

    /// Returns 'true' if the chooser currently selects gshare for this
    /// chooser index.
    pub fn selects_gshare(&self, chooser_idx: usize) -> bool {
        self.chooser.value(chooser_idx) >= CHOOSER_GSHARE_THRESHOLD
    }

    pub fn chooser(&self) -> &CounterTable {
        &self.chooser
    }

    pub fn gshare(&self) -> &GSharePredictor {
        &self.gshare
    }

    pub fn bimodal(&self) -> &BimodalPredictor {
        &self.bimodal
    }
}

impl TracePredictor for HybridPredictor {
    fn name(&self) -> &'static str {
        "hybrid"
    }

    fn predict_one(&mut self, record: &TraceRecord) {
        // Three distinct index spaces over the same address.
        let chooser_idx = self.chooser_index(record.pc);
        let gshare_idx = self.gshare.get_index(record.pc);
        let bimodal_idx = self.bimodal.get_index(record.pc);

        let gshare_pred = self.gshare.prediction_at(gshare_idx);
        let bimodal_pred = self.bimodal.prediction_at(bimodal_idx);

        // Commit the selected sub-predictor's prediction and train only
        // that sub-predictor's counter.
        let committed = if self.selects_gshare(chooser_idx) {
            self.gshare.update_counter(gshare_idx, record.outcome);
            gshare_pred
        } else {
            self.bimodal.update_counter(bimodal_idx, record.outcome);
            bimodal_pred
        };
        self.stats.record(committed == record.outcome);

        // The history register tracks real outcomes unconditionally.
        self.gshare.update_history(record.outcome);

        // The chooser moves only when exactly one sub-predictor was right.
        let gshare_hit = gshare_pred == record.outcome;
        let bimodal_hit = bimodal_pred == record.outcome;
        if gshare_hit && !bimodal_hit {
            self.chooser.increment(chooser_idx);
        } else if bimodal_hit && !gshare_hit {
            self.chooser.decrement(chooser_idx);
        }
    }

    fn stats(&self) -> &SimStats {
        &self.stats
    }

    fn config_string(&self) -> String {
        format!(
            "hybrid {} {} {} {}",
            self.chooser_bits,
            self.gshare.pc_bits(),
            self.gshare.bhr_bits(),
            self.bimodal.pc_bits()
        )
    }

    fn write_final_state(&self, w: &mut dyn io::Write) -> io::Result<()> {
        write_table_section(w, "CHOOSER", self.chooser.values())?;
        write_table_section(w, "GSHARE", self.gshare.table().values())?;
        write_table_section(w, "BIMODAL", self.bimodal.table().values())
    }
}
