//! Countdown engine module
//!
//! The engine owns a single interval timer running on its own tokio task. The
//! host talks to it through typed commands and receives typed notifications
//! back, so tick timing never depends on how busy the consumer is.

pub mod command;
pub mod error;
pub mod timer_engine;

// Re-export main types
pub use command::{Command, Notification};
pub use error::EngineError;
pub use timer_engine::{EngineConfig, EngineStatus, NotificationReceiver, TimerEngine};
