use std::num::NonZeroU64;
use std::path::PathBuf;

use clap::Parser;

use mlq_sched::report::OutputFormat;

/// Multilevel queue CPU scheduler: Round Robin, then Priority, then FCFS.
#[derive(Parser, Debug)]
#[command(name = "mlq-sched", version, about)]
pub struct Cli {
    /// Process file: a count line, then `arrival burst priority queue` per line.
    /// Reads stdin when omitted.
    pub inputfile: Option<PathBuf>,

    /// Round Robin time slice for queue 1.
    #[arg(short = 'q', long, default_value = "4", value_parser = parse_quantum)]
    pub quantum: NonZeroU64,

    /// Leave response times out of the report.
    #[arg(long)]
    pub no_response: bool,

    /// Output format.
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Trace dispatch events to stderr.
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Trace queue contents to stderr (implies -v).
    #[arg(short = 't')]
    pub queue_trace: bool,
}

fn parse_quantum(value: &str) -> Result<NonZeroU64, String> {
    value
        .parse::<NonZeroU64>()
        .map_err(|_| format!("Invalid quantum: {value}. Must be a positive integer"))
}
