//! Timer widget projection

use serde::{Deserialize, Serialize};

use super::{status_label, Locale};
use crate::state::{TimeEntryStatus, TimerState};

/// What the timer widget renders for a given state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusView {
    /// Remaining time as `MM:SS`
    pub remaining: String,
    pub label: String,
    pub status: TimeEntryStatus,
}

impl StatusView {
    pub fn project(state: &TimerState, locale: Locale) -> Self {
        let status = state.status();

        Self {
            remaining: format_remaining(state.remaining_seconds),
            label: status_label(status, locale).to_string(),
            status: status.unwrap_or(TimeEntryStatus::NotStarted),
        }
    }
}

/// Format seconds as zero padded `MM:SS`. Minutes are not wrapped into hours.
pub fn format_remaining(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn formats_fixed_width() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(59), "00:59");
        assert_eq!(format_remaining(25 * 60), "25:00");
        assert_eq!(format_remaining(6000), "100:00");
    }

    #[test]
    fn idle_state_projects_placeholder() {
        let view = StatusView::project(&TimerState::idle(), Locale::En);

        assert_eq!(view.remaining, "00:00");
        assert_eq!(view.label, "Not started");
        assert_eq!(view.status, TimeEntryStatus::NotStarted);
    }

    #[test]
    fn running_state_projects_entry_status() {
        let mut state = TimerState::idle();
        state.begin_run(90, Utc::now());

        let view = StatusView::project(&state, Locale::Es);
        assert_eq!(view.remaining, "01:30");
        assert_eq!(view.label, "En curso");
        assert_eq!(view.status, TimeEntryStatus::InProgress);
    }
}
