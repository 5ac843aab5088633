//! Status presentation module
//!
//! Pure projections of the countdown state into what a timer widget shows.

pub mod labels;
pub mod view;

// Re-export main types
pub use labels::{status_label, Locale};
pub use view::{format_remaining, StatusView};
