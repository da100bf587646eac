use std::process::ExitCode;

/// All errors produced while ingesting a workload or simulating it.
///
/// - **Input errors** (exit code 1): the workload itself is unusable
/// - **Infrastructure errors** (exit code 2): I/O, serialization, broken invariants
#[derive(thiserror::Error, Debug)]
pub enum SchedError {
    // ── Input errors (exit code 1) ───────────────────────────────────

    #[error("Invalid process count: {found:?} (must be a positive integer)")]
    InvalidCount { found: String },

    #[error("Malformed record P{record}: {reason}")]
    MalformedRecord { record: usize, reason: String },

    #[error("Expected {expected} process records, found {found}")]
    MissingRecords { expected: usize, found: usize },

    #[error("Workload overflows the clock: latest arrival plus total burst exceeds {}", u64::MAX)]
    ClockOverflow,

    // ── Infrastructure errors (exit code 2) ──────────────────────────

    #[error("Process P{id} was never completed")]
    Unfinished { id: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchedError {
    pub fn malformed(record: usize, reason: impl Into<String>) -> SchedError {
        SchedError::MalformedRecord {
            record,
            reason: reason.into(),
        }
    }

    pub fn exit_code_num(&self) -> u8 {
        match self {
            Self::InvalidCount { .. }
            | Self::MalformedRecord { .. }
            | Self::MissingRecords { .. }
            | Self::ClockOverflow => 1,

            Self::Unfinished { .. } | Self::Io(_) | Self::Json(_) => 2,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_code_num())
    }
}
