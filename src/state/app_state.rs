//! Shared application state for the HTTP host

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::{sync::watch, time::Instant as TickInstant};
use tracing::{debug, info, warn};

use super::{EntryError, TimeEntryStatus, TimerState};
use crate::{
    engine::{Command, EngineError, EngineStatus, Notification, TimerEngine},
    presentation::Locale,
};

/// Failures of run lifecycle actions
#[derive(Debug, Error)]
pub enum RunError {
    #[error("A run is already in progress")]
    AlreadyRunning,

    #[error("No run is in progress")]
    NotRunning,

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error("Failed to lock timer state: {0}")]
    Lock(String),
}

/// Application state shared between the HTTP handlers and the tick consumer
#[derive(Debug)]
pub struct AppState {
    /// Handle to the countdown engine
    pub engine: TimerEngine,
    /// Consumer-side countdown and current time entry
    pub timer_state: Arc<Mutex<TimerState>>,
    /// When the current run was opened. Ticks queued before one full period
    /// has passed since then belong to an earlier run.
    run_opened_at: Mutex<Option<TickInstant>>,
    /// Length of a new run
    pub run_duration_secs: u64,
    pub locale: Locale,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer state snapshots
    pub timer_update_tx: watch::Sender<TimerState>,
}

impl AppState {
    /// Create a new AppState around an already spawned engine
    pub fn new(
        engine: TimerEngine,
        port: u16,
        host: String,
        run_duration_secs: u64,
        locale: Locale,
    ) -> Self {
        let (timer_update_tx, _) = watch::channel(TimerState::idle());

        Self {
            engine,
            timer_state: Arc::new(Mutex::new(TimerState::idle())),
            run_opened_at: Mutex::new(None),
            run_duration_secs,
            locale,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
        }
    }

    /// Open a new time entry and start the engine
    pub fn begin_run(&self) -> Result<TimerState, RunError> {
        let mut timer_state = self.lock_timer_state()?;

        if timer_state.is_in_progress() {
            return Err(RunError::AlreadyRunning);
        }

        // Taken before the engine sees Start so its first tick is never early
        let opened_at = TickInstant::now();
        self.engine.start()?;
        timer_state.begin_run(self.run_duration_secs, Utc::now());
        self.set_run_opened_at(Some(opened_at));
        let snapshot = timer_state.clone();
        drop(timer_state);

        info!("Run started for {}s", self.run_duration_secs);
        self.record_action("start");
        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    /// Stop the engine and close the current entry with `outcome`
    pub fn end_run(&self, outcome: TimeEntryStatus) -> Result<TimerState, RunError> {
        if !outcome.is_terminal() {
            return Err(EntryError::NotTerminal(outcome).into());
        }

        let mut timer_state = self.lock_timer_state()?;

        if !timer_state.is_in_progress() {
            return Err(RunError::NotRunning);
        }

        self.engine.stop()?;
        timer_state.finish(outcome, Utc::now())?;
        let snapshot = timer_state.clone();
        drop(timer_state);

        info!("Run ended as {} with {}s left", outcome, snapshot.remaining_seconds);
        self.record_action("stop");
        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    /// Route a raw command string. Known commands map onto the run lifecycle
    /// with the engine's leniency: start while a run is in progress and stop
    /// without one both leave the state as it is. Anything else is handed to
    /// the engine, which logs and drops it.
    pub fn forward_command(&self, raw: &str) -> Result<Option<TimerState>, RunError> {
        let result = match raw.parse::<Command>() {
            Ok(Command::Start) => self.begin_run(),
            Ok(Command::Stop) => self.end_run(TimeEntryStatus::Interrupted),
            Err(_) => {
                self.engine.post(raw)?;
                self.record_action("command");
                return Ok(None);
            }
        };

        match result {
            Err(RunError::AlreadyRunning) | Err(RunError::NotRunning) => {
                debug!("Command {:?} left the run unchanged", raw);
                self.get_timer_state().map(Some).map_err(RunError::Lock)
            }
            other => other.map(Some),
        }
    }

    /// Apply one engine notification, finishing the run when it runs out
    pub fn handle_notification(&self, notification: Notification) -> Result<(), RunError> {
        let mut timer_state = self.lock_timer_state()?;

        if self.is_stale_tick() {
            debug!("Dropping {:?} left over from a previous run", notification);
            return Ok(());
        }

        let expired = timer_state.apply(&notification);
        if expired {
            info!("Countdown reached zero, completing run");
            self.engine.stop()?;
            timer_state.finish(TimeEntryStatus::Completed, Utc::now())?;
        } else {
            debug!("Tick, {}s remaining", timer_state.remaining_seconds);
        }

        let snapshot = timer_state.clone();
        drop(timer_state);

        if expired {
            self.record_action("timeout");
        }
        self.publish(snapshot);
        Ok(())
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.timer_state.lock()
            .map(|state| state.clone())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    pub fn engine_status(&self) -> EngineStatus {
        self.engine.status()
    }

    /// Watch every timer state change
    pub fn subscribe_timer(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// A tick taken off the channel less than one period after the current
    /// run was opened was emitted before that run's interval existed.
    fn is_stale_tick(&self) -> bool {
        let opened_at = self.run_opened_at.lock().ok().and_then(|opened| *opened);
        match opened_at {
            Some(opened_at) => TickInstant::now() < opened_at + self.engine.period(),
            None => false,
        }
    }

    fn set_run_opened_at(&self, at: Option<TickInstant>) {
        if let Ok(mut opened_at) = self.run_opened_at.lock() {
            *opened_at = at;
        }
    }

    fn publish(&self, snapshot: TimerState) {
        // No subscribers is fine, the value is kept for later ones
        self.timer_update_tx.send_replace(snapshot);
    }

    fn lock_timer_state(&self) -> Result<std::sync::MutexGuard<'_, TimerState>, RunError> {
        self.timer_state.lock().map_err(|e| {
            warn!("Timer state lock poisoned: {}", e);
            RunError::Lock(e.to_string())
        })
    }
}
