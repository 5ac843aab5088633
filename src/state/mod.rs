//! State management module
//!
//! This module contains the time entry record, the consumer-side countdown and
//! the shared application state used by the HTTP host.

pub mod app_state;
pub mod time_entry;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, RunError};
pub use time_entry::{EntryError, TimeEntry, TimeEntryStatus};
pub use timer_state::TimerState;
