use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::SchedError;
use crate::process::{ProcessSpec, Time};

// The input is structured as follows: lines starting with '#' and blank lines
// are ignored. The first remaining line holds the process count N. Each of the
// next N lines describes one process as `arrival burst priority queue_level`.
// Every field must be an integer; integer fields past the fourth are ignored.
// The first bad record rejects the batch.
fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[+-]?[0-9]+$").expect("integer pattern is valid"))
}

fn is_skipped(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

pub fn parse_count(line: &str) -> Result<usize, SchedError> {
    let trimmed = line.trim();
    match trimmed.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SchedError::InvalidCount {
            found: trimmed.to_string(),
        }),
    }
}

/// Parses one record line into its input tuple. `record` is the 1-based
/// position used for error messages.
pub fn parse_record(record: usize, line: &str) -> Result<ProcessSpec, SchedError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(SchedError::malformed(
            record,
            format!("expected 4 fields, found {}", fields.len()),
        ));
    }
    if let Some(bad) = fields.iter().find(|f| !integer_pattern().is_match(f)) {
        return Err(SchedError::malformed(record, format!("non-integer field {bad:?}")));
    }

    let mut values = [0i64; 4];
    for (slot, name) in ["arrival", "burst", "priority", "queue level"].iter().enumerate() {
        let text = fields[slot];
        values[slot] = text
            .parse()
            .map_err(|_| SchedError::malformed(record, format!("{name} {text:?} out of range")))?;
    }
    let [arrival, burst, priority, queue_level] = values;

    let arrival_time = Time::try_from(arrival)
        .map_err(|_| SchedError::malformed(record, format!("negative arrival time {arrival}")))?;
    let burst_time = match Time::try_from(burst) {
        Ok(b) if b > 0 => b,
        _ => {
            return Err(SchedError::malformed(
                record,
                format!("burst time must be positive, got {burst}"),
            ))
        }
    };

    Ok(ProcessSpec::new(arrival_time, burst_time, priority, queue_level))
}

/// Reads a whole workload: the count line, then exactly that many records.
pub fn read_workload<R: BufRead>(reader: R) -> Result<Vec<ProcessSpec>, SchedError> {
    let mut lines = reader.lines();

    let mut expected = None;
    for line in lines.by_ref() {
        let line = line?;
        if is_skipped(&line) {
            continue;
        }
        expected = Some(parse_count(&line)?);
        break;
    }
    let Some(expected) = expected else {
        return Err(SchedError::InvalidCount { found: String::new() });
    };

    let mut specs = Vec::with_capacity(expected);
    for line in lines {
        if specs.len() == expected {
            break;
        }
        let line = line?;
        if is_skipped(&line) {
            continue;
        }
        specs.push(parse_record(specs.len() + 1, &line)?);
    }

    if specs.len() < expected {
        return Err(SchedError::MissingRecords {
            expected,
            found: specs.len(),
        });
    }

    Ok(specs)
}

pub fn read_input_file(filename: &Path) -> Result<Vec<ProcessSpec>, SchedError> {
    let file = File::open(filename)?;
    read_workload(BufReader::new(file))
}
