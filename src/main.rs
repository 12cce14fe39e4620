//! Trace-driven branch predictor simulator CLI.
//!
//! Runs one predictor over a text trace of `<hex-address> <t|n>` records
//! and prints the final report.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bpsim::predictor::{
    BimodalPredictor, GSharePredictor, HybridPredictor, SmithPredictor, TracePredictor,
};
use bpsim::report::write_report;
use bpsim::trace::TextTrace;

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    about = "Trace-driven branch predictor simulator",
    long_about = "Simulate a branch predictor against a trace of branch \
                  addresses and outcomes, then print prediction statistics \
                  and the final predictor state.\n\nExamples:\n  \
                  sim smith 4 traces/gcc_trace.txt\n  \
                  sim gshare 11 5 traces/gcc_trace.txt"
)]
struct Cli {
    #[command(subcommand)]
    predictor: PredictorCmd,

    /// Write the report to a file instead of stdout.
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum PredictorCmd {
    /// Single n-bit saturating counter shared by all branches.
    Smith {
        /// Counter width in bits.
        #[arg(value_parser = clap::value_parser!(u32).range(1..=30))]
        num_bits: u32,
        trace_file: String,
    },

    /// Counter table indexed by low-order PC bits.
    Bimodal {
        /// Table index width in bits.
        #[arg(value_parser = clap::value_parser!(u32).range(1..=30))]
        pc_bits: u32,
        trace_file: String,
    },

    /// Counter table indexed by PC bits XOR'ed with global branch history.
    Gshare {
        /// Table index width in bits.
        #[arg(value_parser = clap::value_parser!(u32).range(1..=30))]
        pc_bits: u32,
        /// History register width in bits (at most pc_bits).
        #[arg(value_parser = clap::value_parser!(u32).range(0..=30))]
        bhr_bits: u32,
        trace_file: String,
    },

    /// Chooser-arbitrated combination of gshare and bimodal.
    Hybrid {
        /// Chooser table index width in bits.
        #[arg(value_parser = clap::value_parser!(u32).range(1..=30))]
        chooser_bits: u32,
        /// Gshare table index width in bits.
        #[arg(value_parser = clap::value_parser!(u32).range(1..=30))]
        gshare_bits: u32,
        /// History register width in bits (at most gshare_bits).
        #[arg(value_parser = clap::value_parser!(u32).range(0..=30))]
        bhr_bits: u32,
        /// Bimodal table index width in bits.
        #[arg(value_parser = clap::value_parser!(u32).range(1..=30))]
        bimodal_bits: u32,
        trace_file: String,
    },
}

impl PredictorCmd {
    fn trace_file(&self) -> &str {
        match self {
            Self::Smith { trace_file, .. }
            | Self::Bimodal { trace_file, .. }
            | Self::Gshare { trace_file, .. }
            | Self::Hybrid { trace_file, .. } => trace_file,
        }
    }

    fn build(&self) -> Result<Box<dyn TracePredictor>, String> {
        match *self {
            Self::Smith { num_bits, .. } => Ok(Box::new(SmithPredictor::new(num_bits))),
            Self::Bimodal { pc_bits, .. } => Ok(Box::new(BimodalPredictor::new(pc_bits))),
            Self::Gshare { pc_bits, bhr_bits, .. } => {
                if bhr_bits > pc_bits {
                    return Err(format!(
                        "bhr_bits ({}) must not exceed pc_bits ({})",
                        bhr_bits, pc_bits
                    ));
                }
                Ok(Box::new(GSharePredictor::new(pc_bits, bhr_bits)))
            }
            Self::Hybrid {
                chooser_bits,
                gshare_bits,
                bhr_bits,
                bimodal_bits,
                ..
            } => {
                if bhr_bits > gshare_bits {
                    return Err(format!(
                        "bhr_bits ({}) must not exceed gshare_bits ({})",
                        bhr_bits, gshare_bits
                    ));
                }
                Ok(Box::new(HybridPredictor::new(
                    chooser_bits,
                    gshare_bits,
                    bhr_bits,
                    bimodal_bits,
                )))
            }
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let trace_arg = cli.predictor.trace_file();
    let trace = TextTrace::from_file(trace_arg).map_err(|e| e.to_string())?;

    let mut predictor = cli.predictor.build()?;
    predictor.run(trace.records());

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("failed to create '{}': {}", path.display(), e))?;
            let mut w = BufWriter::new(file);
            write_report(&mut w, predictor.as_ref(), trace_arg)
                .and_then(|_| w.flush())
                .map_err(|e| e.to_string())
        }
        None => {
            let stdout = io::stdout();
            let mut w = stdout.lock();
            write_report(&mut w, predictor.as_ref(), trace_arg).map_err(|e| e.to_string())
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("sim: {}", msg);
            ExitCode::FAILURE
        }
    }
}
