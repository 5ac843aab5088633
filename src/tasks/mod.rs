//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod tick_consumer;

// Re-export main functions
pub use tick_consumer::tick_consumer_task;
