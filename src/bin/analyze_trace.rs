//! Summarize the branch behavior recorded in a text trace.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bpsim::stats::BranchStats;
use bpsim::trace::TextTrace;

#[derive(Parser, Debug)]
#[command(name = "analyze-trace", about = "Per-branch statistics for a branch trace")]
struct Cli {
    /// Trace file of `<hex-address> <t|n>` lines.
    trace_file: String,

    /// Number of most-frequent branches to list.
    #[arg(short = 'n', long, default_value_t = 10)]
    top: usize,
}

fn analyze(trace: &TextTrace, top: usize) {
    let mut stat = BranchStats::new();
    for record in trace.records() {
        stat.record(record);
    }

    let total = trace.num_entries();
    let taken: usize = stat.data.values().map(|b| b.times_taken()).sum();
    println!("[*] {}: {} records", trace.name(), total);
    if total > 0 {
        println!("    taken rate: {:.2}%", taken as f64 / total as f64 * 100.0);
    }
    println!("    unique branches:   {}", stat.num_unique_branches());
    println!("    always taken:      {}", stat.num_always_taken());
    println!("    never taken:       {}", stat.num_never_taken());
    println!("    single occurrence: {}", stat.num_single_occurence());
    println!();

    println!(" {:>10} | {:>10} | {:>10} | pc", "executed", "taken", "not-taken");
    println!("------------+------------+------------+-----------");
    for (pc, data) in stat.get_common_branches(top) {
        println!(
            " {:>10} | {:>10} | {:>10} | {:08x}",
            data.occ,
            data.times_taken(),
            data.occ - data.times_taken(),
            pc
        );
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match TextTrace::from_file(&cli.trace_file) {
        Ok(trace) => {
            analyze(&trace, cli.top);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("analyze-trace: {}", e);
            ExitCode::FAILURE
        }
    }
}
