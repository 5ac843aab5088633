//! Pomodoro Timer - a countdown engine with a local control surface
//!
//! This library provides an off-thread countdown engine that emits typed tick
//! notifications, the time entry state those ticks drive, and a small HTTP
//! host that plays the part of the timer widget.

pub mod api;
pub mod config;
pub mod engine;
pub mod presentation;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use engine::{Command, EngineConfig, EngineStatus, Notification, TimerEngine};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
