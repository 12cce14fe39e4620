//! Implementations of different branch predictors.

pub mod bimodal;
pub mod counter;
pub mod gshare;
pub mod hybrid;
pub mod smith;
pub mod table;

pub use bimodal::*;
pub use counter::*;
pub use gshare::*;
pub use hybrid::*;
pub use smith::*;
pub use table::*;

use std::io;

use crate::branch::TraceRecord;
use crate::stats::SimStats;

/// Interface to a trace-driven predictor.
///
/// A predictor consumes one [TraceRecord] at a time, in trace order: it
/// forms a prediction from its current state, tallies it against the
/// actual outcome, and then trains on that outcome.
pub trait TracePredictor {
    fn name(&self) -> &'static str;

    /// Process a single record: predict, tally, update internal state.
    fn predict_one(&mut self, record: &TraceRecord);

    /// Return the counters accumulated so far.
    fn stats(&self) -> &SimStats;

    /// Echo of the predictor's configuration for the report's COMMAND
    /// section, e.g. `gshare 11 5`.
    fn config_string(&self) -> String;

    /// Write the `FINAL ... CONTENTS` section(s) of the report.
    fn write_final_state(&self, w: &mut dyn io::Write) -> io::Result<()>;

    /// Process an entire trace in order.
    fn run(&mut self, records: &[TraceRecord]) {
        for record in records {
            self.predict_one(record);
        }
        tracing::info!(
            predictor = self.name(),
            predictions = self.stats().predictions(),
            mispredictions = self.stats().mispredictions(),
            "run complete"
        );
    }
}
