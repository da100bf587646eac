use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

// prints trace lines to stderr so stdout stays a clean report
struct StderrTrace;

impl Log for StderrTrace {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", record.args());
        }
    }

    fn flush(&self) {}
}

static TRACE: StderrTrace = StderrTrace;

pub fn level_for(verbose: bool, queue_trace: bool) -> LevelFilter {
    if queue_trace {
        LevelFilter::Trace
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

pub fn init(verbose: bool, queue_trace: bool) -> Result<(), SetLoggerError> {
    log::set_logger(&TRACE)?;
    log::set_max_level(level_for(verbose, queue_trace));
    Ok(())
}
