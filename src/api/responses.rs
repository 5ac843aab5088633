//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    engine::EngineStatus,
    presentation::StatusView,
    state::{TimeEntry, TimeEntryStatus},
};

/// Response structure for run lifecycle endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub view: StatusView,
    pub time_entry: Option<TimeEntry>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, view: StatusView, time_entry: Option<TimeEntry>) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            view,
            time_entry,
        }
    }

    pub fn running(message: String, view: StatusView, time_entry: Option<TimeEntry>) -> Self {
        Self::new("running", message, view, time_entry)
    }

    pub fn stopped(message: String, view: StatusView, time_entry: Option<TimeEntry>) -> Self {
        Self::new("stopped", message, view, time_entry)
    }

    pub fn accepted(message: String, view: StatusView, time_entry: Option<TimeEntry>) -> Self {
        Self::new("accepted", message, view, time_entry)
    }
}

/// Error body returned alongside a non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Body of POST /timer/stop
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopRequest {
    pub outcome: Option<TimeEntryStatus>,
}

/// Body of POST /timer/command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

/// Status response with engine and countdown information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub engine: EngineStatus,
    pub remaining_seconds: u64,
    pub view: StatusView,
    pub time_entry: Option<TimeEntry>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
