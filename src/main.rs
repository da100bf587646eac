mod cli;
mod trace;

use std::io;
use std::process::ExitCode;

use clap::Parser;

use mlq_sched::report::{self, OutputFormat};
use mlq_sched::{utils, SchedError, SimConfig};

use crate::cli::Cli;

fn run(cli: &Cli) -> Result<(), SchedError> {
    let specs = match &cli.inputfile {
        Some(path) => utils::read_input_file(path)?,
        None => utils::read_workload(io::stdin().lock())?,
    };

    let config = SimConfig {
        quantum: cli.quantum,
        track_response_time: !cli.no_response,
    };
    let report = mlq_sched::simulate(&specs, &config)?;

    let mut out = io::stdout().lock();
    match cli.output {
        OutputFormat::Json => report::emit_json(&mut out, &report)?,
        OutputFormat::Human => report::print_report(&mut out, &report)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = trace::init(cli.verbose, cli.queue_trace) {
        eprintln!("warning: tracing disabled: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report::emit_error(cli.output, &e);
            e.exit_code()
        }
    }
}
