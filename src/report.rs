//! Final report formatting.
//!
//! The layout (labels, tab stops, two-decimal rate) is fixed: downstream
//! tooling diffs these reports against reference outputs.

use std::io::{self, Write};

use crate::predictor::TracePredictor;

/// Write the full report for one finished run.
///
/// `trace_arg` is echoed verbatim in the COMMAND section, after the
/// predictor's own configuration.
pub fn write_report(
    w: &mut dyn Write,
    predictor: &dyn TracePredictor,
    trace_arg: &str,
) -> io::Result<()> {
    let stats = predictor.stats();
    writeln!(w, "COMMAND")?;
    writeln!(w, "./sim {} {}", predictor.config_string(), trace_arg)?;
    writeln!(w, "OUTPUT")?;
    writeln!(w, "number of predictions:\t\t{}", stats.predictions())?;
    writeln!(w, "number of mispredictions:\t{}", stats.mispredictions())?;
    writeln!(
        w,
        "misprediction rate:\t\t{:.2}%",
        stats.misprediction_rate() * 100.0
    )?;
    predictor.write_final_state(w)
}

/// Write one `FINAL <label> CONTENTS` table section, one entry per line.
pub fn write_table_section(
    w: &mut dyn Write,
    label: &str,
    values: impl Iterator<Item = u32>,
) -> io::Result<()> {
    writeln!(w, "FINAL {} CONTENTS", label)?;
    for (idx, value) in values.enumerate() {
        writeln!(w, "{}\t{}", idx, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::{Outcome, TraceRecord};
    use crate::predictor::{
        BimodalPredictor, HybridPredictor, SmithPredictor, TracePredictor,
    };

    #[test]
    fn bimodal_report_shape() {
        let mut p = BimodalPredictor::new(2);
        let records = [
            TraceRecord { pc: 0x4, outcome: Outcome::T },
            TraceRecord { pc: 0x4, outcome: Outcome::N },
            TraceRecord { pc: 0x4, outcome: Outcome::T },
        ];
        p.run(&records);

        let mut out = Vec::new();
        write_report(&mut out, &p, "sample.txt").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "COMMAND\n\
             ./sim bimodal 2 sample.txt\n\
             OUTPUT\n\
             number of predictions:\t\t3\n\
             number of mispredictions:\t1\n\
             misprediction rate:\t\t33.33%\n\
             FINAL BIMODAL CONTENTS\n\
             0\t4\n\
             1\t5\n\
             2\t4\n\
             3\t4\n"
        );
    }

    #[test]
    fn hybrid_report_shape() {
        // Chooser starts on bimodal: the single taken record trains only
        // bimodal index 1, gshare's table is untouched.
        let mut p = HybridPredictor::new(2, 3, 1, 2);
        p.run(&[TraceRecord { pc: 0x4, outcome: Outcome::T }]);

        let mut out = Vec::new();
        write_report(&mut out, &p, "sample.txt").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "COMMAND\n\
             ./sim hybrid 2 3 1 2 sample.txt\n\
             OUTPUT\n\
             number of predictions:\t\t1\n\
             number of mispredictions:\t0\n\
             misprediction rate:\t\t0.00%\n\
             FINAL CHOOSER CONTENTS\n\
             0\t1\n\
             1\t1\n\
             2\t1\n\
             3\t1\n\
             FINAL GSHARE CONTENTS\n\
             0\t4\n\
             1\t4\n\
             2\t4\n\
             3\t4\n\
             4\t4\n\
             5\t4\n\
             6\t4\n\
             7\t4\n\
             FINAL BIMODAL CONTENTS\n\
             0\t4\n\
             1\t5\n\
             2\t4\n\
             3\t4\n"
        );
    }

    #[test]
    fn empty_run_reports_zero_rate() {
        let p = SmithPredictor::new(3);
        let mut out = Vec::new();
        write_report(&mut out, &p, "empty.txt").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("number of predictions:\t\t0\n"));
        assert!(text.contains("misprediction rate:\t\t0.00%\n"));
        assert!(text.contains("FINAL COUNTER CONTENT:\t\t4\n"));
    }
}
