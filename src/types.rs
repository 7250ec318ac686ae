//! Core types: the host-facing outcome and per-run bookkeeping

use std::path::PathBuf;
use std::process::ExitCode;

/// Result of a post-processing run as understood by NZBGet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Everything processed without a single failure (exit 93)
    Success,
    /// Configuration error or unmet prerequisite (exit 94)
    Failure,
    /// Nothing to do, or completed with non-fatal failures (exit 95)
    NoAction,
}

impl Outcome {
    /// Exit code the host expects for this outcome
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Success => 93,
            Outcome::Failure => 94,
            Outcome::NoAction => 95,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// Whether the run has hit any per-file failure so far
///
/// Starts `Clean` and only ever moves to `Degraded`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunStatus {
    /// No failure recorded
    #[default]
    Clean,
    /// At least one extraction or deletion failed
    Degraded,
}

impl RunStatus {
    /// Record a failure
    pub fn degrade(&mut self) {
        *self = RunStatus::Degraded;
    }

    /// True while no failure has been recorded
    pub fn is_clean(self) -> bool {
        self == RunStatus::Clean
    }
}

/// Everything a completed pipeline run observed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Archives that were extracted successfully, in processing order
    pub extracted: Vec<PathBuf>,
    /// Archives whose extraction failed
    pub failed_extractions: Vec<PathBuf>,
    /// Leftover parts matched by the wildcard, in walk order
    pub leftovers: Vec<PathBuf>,
    /// Leftovers that were deleted
    pub deleted: Vec<PathBuf>,
    /// Leftovers that could not be deleted
    pub failed_deletions: Vec<PathBuf>,
    /// Whether cleanup ran at all
    pub cleanup_ran: bool,
    /// Aggregate failure state
    pub status: RunStatus,
}

impl RunReport {
    /// Set once any extraction has succeeded
    pub fn extract_occurred(&self) -> bool {
        !self.extracted.is_empty()
    }

    /// Outcome to report to the host
    pub fn outcome(&self) -> Outcome {
        if self.status.is_clean() {
            Outcome::Success
        } else {
            Outcome::NoAction
        }
    }
}
