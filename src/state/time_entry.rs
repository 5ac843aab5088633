//! Time entry record and its status lifecycle

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status of a single timed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeEntryStatus {
    NotStarted,
    InProgress,
    Completed,
    Interrupted,
    Abandoned,
    Extended,
}

impl TimeEntryStatus {
    /// Whether this status closes a run
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TimeEntryStatus::Completed
                | TimeEntryStatus::Interrupted
                | TimeEntryStatus::Abandoned
                | TimeEntryStatus::Extended
        )
    }
}

impl fmt::Display for TimeEntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeEntryStatus::NotStarted => write!(f, "not_started"),
            TimeEntryStatus::InProgress => write!(f, "in_progress"),
            TimeEntryStatus::Completed => write!(f, "completed"),
            TimeEntryStatus::Interrupted => write!(f, "interrupted"),
            TimeEntryStatus::Abandoned => write!(f, "abandoned"),
            TimeEntryStatus::Extended => write!(f, "extended"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("{0} is not a terminal time entry status")]
    NotTerminal(TimeEntryStatus),

    #[error("Time entry already finished as {0}")]
    AlreadyFinished(TimeEntryStatus),
}

/// A single timed run. Persisting it is left to whoever consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub status: TimeEntryStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl TimeEntry {
    /// Create an entry for a run that starts at `at`
    pub fn begin(at: DateTime<Utc>) -> Self {
        Self {
            status: TimeEntryStatus::InProgress,
            started_at: Some(at),
            ended_at: None,
        }
    }

    /// Close the entry with a terminal status
    pub fn finish(&mut self, status: TimeEntryStatus, at: DateTime<Utc>) -> Result<(), EntryError> {
        if !status.is_terminal() {
            return Err(EntryError::NotTerminal(status));
        }
        if self.status.is_terminal() {
            return Err(EntryError::AlreadyFinished(self.status));
        }

        self.status = status;
        self.ended_at = Some(at);
        Ok(())
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == TimeEntryStatus::InProgress
    }
}
