//! Countdown state kept by the tick consumer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntryError, TimeEntry, TimeEntryStatus};
use crate::engine::Notification;

/// Consumer-side countdown, advanced only by engine notifications.
///
/// `remaining_seconds` is only meaningful while the entry is in progress; it
/// may hold a stale value otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_seconds: u64,
    pub time_entry: Option<TimeEntry>,
}

impl TimerState {
    /// Create an idle timer state with no run attached
    pub fn idle() -> Self {
        Self {
            remaining_seconds: 0,
            time_entry: None,
        }
    }

    /// Attach a fresh in-progress entry and reset the countdown
    pub fn begin_run(&mut self, duration_secs: u64, at: DateTime<Utc>) {
        self.remaining_seconds = duration_secs;
        self.time_entry = Some(TimeEntry::begin(at));
    }

    /// Apply one engine notification. Returns true once the countdown of an
    /// in-progress run has reached zero.
    pub fn apply(&mut self, notification: &Notification) -> bool {
        match notification {
            Notification::Tick => {
                if !self.is_in_progress() {
                    return false;
                }
                self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
                self.remaining_seconds == 0
            }
        }
    }

    /// Finalize the current entry, if any
    pub fn finish(&mut self, status: TimeEntryStatus, at: DateTime<Utc>) -> Result<(), EntryError> {
        match self.time_entry.as_mut() {
            Some(entry) => entry.finish(status, at),
            None => Ok(()),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.time_entry
            .as_ref()
            .map(TimeEntry::is_in_progress)
            .unwrap_or(false)
    }

    pub fn status(&self) -> Option<TimeEntryStatus> {
        self.time_entry.as_ref().map(|entry| entry.status)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_ignored_without_a_run() {
        let mut state = TimerState::idle();
        assert!(!state.apply(&Notification::Tick));
        assert_eq!(state.remaining_seconds, 0);
        assert_eq!(state.status(), None);
    }

    #[test]
    fn ticks_count_down_to_expiry() {
        let mut state = TimerState::idle();
        state.begin_run(3, Utc::now());

        assert!(!state.apply(&Notification::Tick));
        assert!(!state.apply(&Notification::Tick));
        assert_eq!(state.remaining_seconds, 1);
        assert!(state.apply(&Notification::Tick));
        assert_eq!(state.remaining_seconds, 0);
    }

    #[test]
    fn countdown_never_goes_below_zero() {
        let mut state = TimerState::idle();
        state.begin_run(0, Utc::now());

        assert!(state.apply(&Notification::Tick));
        assert!(state.apply(&Notification::Tick));
        assert_eq!(state.remaining_seconds, 0);
    }

    #[test]
    fn finished_run_stops_counting() {
        let mut state = TimerState::idle();
        state.begin_run(10, Utc::now());
        state.apply(&Notification::Tick);
        state.finish(TimeEntryStatus::Interrupted, Utc::now()).unwrap();

        assert!(!state.apply(&Notification::Tick));
        assert_eq!(state.remaining_seconds, 9);
        assert_eq!(state.status(), Some(TimeEntryStatus::Interrupted));
    }

    #[test]
    fn finish_without_entry_is_a_no_op() {
        let mut state = TimerState::idle();
        assert!(state.finish(TimeEntryStatus::Completed, Utc::now()).is_ok());
        assert!(state.time_entry.is_none());
    }
}
