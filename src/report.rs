use std::fmt;
use std::io::{self, Write};

use crate::metrics::{Report, Summary};
use crate::process::ProcessResult;

/// Output format selection for the report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object on stdout.
    Json,
    /// Table plus summary lines.
    #[default]
    Human,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Human => write!(f, "human"),
        }
    }
}

const RULE_WIDTH: usize = 95;

fn response_cell(result: &ProcessResult) -> String {
    match result.response_time {
        Some(t) => t.to_string(),
        None => "-".to_string(),
    }
}

pub fn print_table<W: Write>(out: &mut W, results: &[ProcessResult]) -> io::Result<()> {
    let rule = "-".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "{:<4} | {:<3} | {:<4} | {:<5} | {:<4} | {:<5} | {:<5} | {:<5} | {:<5}",
        "ID", "Q", "Arr", "Burst", "Prio", "Comp", "Turn", "Wait", "Resp"
    )?;
    writeln!(out, "{rule}")?;
    for r in results {
        writeln!(
            out,
            "P{:<3} | {:<3} | {:<4} | {:<5} | {:<4} | {:<5} | {:<5} | {:<5} | {:<5}",
            r.id,
            r.queue_level,
            r.arrival_time,
            r.burst_time,
            r.priority,
            r.completion_time,
            r.turnaround_time,
            r.waiting_time,
            response_cell(r)
        )?;
    }
    writeln!(out, "{rule}")
}

pub fn print_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(out, "Avg Turnaround Time: {:.2}", summary.avg_turnaround_time)?;
    writeln!(out, "Avg Waiting Time:    {:.2}", summary.avg_waiting_time)?;
    if let Some(avg) = summary.avg_response_time {
        writeln!(out, "Avg Response Time:   {:.2}", avg)?;
    }
    if let Some(throughput) = summary.throughput {
        writeln!(out, "Throughput:          {:.4} processes/unit time", throughput)?;
    }
    if let Some(utilization) = summary.cpu_utilization {
        writeln!(out, "CPU Utilization:     {:.2}%", utilization)?;
    }
    Ok(())
}

pub fn print_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    print_table(out, &report.results)?;
    print_summary(out, &report.summary)
}

/// Writes the report as a single JSON line.
pub fn emit_json<W: Write>(out: &mut W, report: &Report) -> Result<(), crate::SchedError> {
    let json = serde_json::to_string(report)?;
    writeln!(out, "{json}")?;
    Ok(())
}

/// Write an error to stdout (JSON mode) or stderr (human mode).
pub fn emit_error(format: OutputFormat, err: &crate::SchedError) {
    match format {
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "error": err.to_string(),
                "exit_code": err.exit_code_num(),
            });
            println!("{obj}");
        }
        OutputFormat::Human => {
            eprintln!("error: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::QueueLevel;

    fn result(response_time: Option<u64>) -> ProcessResult {
        ProcessResult {
            id: 1,
            queue_level: QueueLevel::RoundRobin,
            arrival_time: 0,
            burst_time: 5,
            priority: 0,
            completion_time: 5,
            turnaround_time: 5,
            waiting_time: 0,
            response_time,
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn table_rows_line_up() {
        let text = render(|out| print_table(out, &[result(Some(0))]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "ID   | Q   | Arr  | Burst | Prio | Comp  | Turn  | Wait  | Resp ");
        assert_eq!(lines[3], "P1   | 1   | 0    | 5     | 0    | 5     | 5     | 0     | 0    ");
    }

    #[test]
    fn untracked_response_prints_dash() {
        let text = render(|out| print_table(out, &[result(None)]));
        assert!(text.lines().nth(3).unwrap().ends_with("| -    "));
    }

    #[test]
    fn summary_skips_rates_without_a_clock() {
        let summary = Summary {
            count: 0,
            final_clock: 0,
            total_burst: 0,
            avg_turnaround_time: 0.0,
            avg_waiting_time: 0.0,
            avg_response_time: None,
            throughput: None,
            cpu_utilization: None,
        };
        let text = render(|out| print_summary(out, &summary));
        assert_eq!(text, "Avg Turnaround Time: 0.00\nAvg Waiting Time:    0.00\n");
    }

    #[test]
    fn json_report_is_one_line() {
        let report = Report {
            results: vec![result(Some(0))],
            summary: Summary::from_results(&[result(Some(0))], 5, true),
            stage_clocks: [0, 5, 5, 5],
        };
        let mut buf = Vec::new();
        emit_json(&mut buf, &report).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["results"][0]["queue_level"], 1);
        assert_eq!(parsed["summary"]["throughput"], 0.2);
        assert_eq!(parsed["stage_clocks"][3], 5);
    }
}
