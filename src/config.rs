//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::{engine::EngineConfig, presentation::Locale};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "pomodoro-timer")]
#[command(about = "A countdown timer engine with a local control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20553")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Run duration in minutes
    #[arg(short, long, default_value = "25")]
    pub duration: u64,

    /// Tick period in milliseconds
    #[arg(long, default_value = "1000", hide = true)]
    pub tick_millis: u64,

    /// Language of status labels
    #[arg(long, value_enum, default_value_t = Locale::En)]
    pub locale: Locale,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn run_duration_secs(&self) -> u64 {
        self.duration.saturating_mul(60)
    }

    /// Engine settings derived from the CLI. A zero period falls back to one
    /// millisecond since tokio intervals reject it.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::with_period(Duration::from_millis(self.tick_millis.max(1)))
    }
}
