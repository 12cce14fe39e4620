//! Smith n-bit predictor: a single saturating counter shared by the whole
//! address space.

use std::io;

use crate::branch::TraceRecord;
use crate::predictor::counter::SaturatingCounter;
use crate::predictor::TracePredictor;
use crate::stats::SimStats;

pub struct SmithPredictor {
    num_bits: u32,
    ctr: SaturatingCounter,
    stats: SimStats,
}

impl SmithPredictor {
    /// Create a predictor with an `num_bits`-wide counter, initialized to
    /// its midpoint.
    pub fn new(num_bits: u32) -> Self {
        tracing::debug!(num_bits, "building smith predictor");
        Self {
            num_bits,
            ctr: SaturatingCounter::at_midpoint(num_bits),
            stats: SimStats::new(),
        }
    }

    pub fn counter_value(&self) -> u32 {
        self.ctr.value()
    }
}

impl TracePredictor for SmithPredictor {
    fn name(&self) -> &'static str {
        "smith"
    }

    fn predict_one(&mut self, record: &TraceRecord) {
        let prediction = self.ctr.predict();
        self.stats.record(prediction == record.outcome);
        self.ctr.update(record.outcome);
    }

    fn stats(&self) -> &SimStats {
        &self.stats
    }

    fn config_string(&self) -> String {
        format!("smith {}", self.num_bits)
    }

    fn write_final_state(&self, w: &mut dyn io::Write) -> io::Result<()> {
        writeln!(w, "FINAL COUNTER CONTENT:\t\t{}", self.ctr.value())
    }
}
