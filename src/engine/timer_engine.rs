//! Timer engine background task and its handle

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use super::{Command, EngineError, Notification};

/// Receiving half of the engine's notification channel
pub type NotificationReceiver = mpsc::UnboundedReceiver<Notification>;

/// Externally visible engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineStatus {
    Idle,
    Running,
}

impl EngineStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, EngineStatus::Running)
    }
}

/// Engine tuning
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Time between two consecutive ticks
    pub period: Duration,
}

impl EngineConfig {
    pub fn with_period(period: Duration) -> Self {
        Self { period }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }
}

/// What travels over the command channel. Raw strings that failed to parse
/// still reach the task so the rejection is logged where commands are handled.
#[derive(Debug)]
enum Inbound {
    Command(Command),
    Unrecognized(String),
    Shutdown,
}

/// Handle to one running engine task.
///
/// Every instance owns its own interval; dropping the handle, calling
/// [`TimerEngine::close`] or [`TimerEngine::dispose`] ends the task.
#[derive(Debug)]
pub struct TimerEngine {
    commands: mpsc::UnboundedSender<Inbound>,
    period: Duration,
    status_rx: watch::Receiver<EngineStatus>,
    task: JoinHandle<()>,
}

impl TimerEngine {
    /// Spawn a new engine on the current tokio runtime.
    ///
    /// Returns the handle together with the single consumer of its ticks.
    pub fn spawn(config: EngineConfig) -> (Self, NotificationReceiver) {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (notification_tx, notification_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(EngineStatus::Idle);
        let period = config.period;

        let task = tokio::spawn(engine_task(config, command_rx, notification_tx, status_tx));

        (
            Self {
                commands,
                period,
                status_rx,
                task,
            },
            notification_rx,
        )
    }

    /// Ask the engine to begin ticking. A no-op when already running.
    pub fn start(&self) -> Result<(), EngineError> {
        self.dispatch(Command::Start)
    }

    /// Ask the engine to stop ticking. Always safe, even when idle.
    pub fn stop(&self) -> Result<(), EngineError> {
        self.dispatch(Command::Stop)
    }

    pub fn dispatch(&self, command: Command) -> Result<(), EngineError> {
        self.send(Inbound::Command(command))
    }

    /// Forward an untyped command string. Unknown strings are ignored by the
    /// engine after being logged.
    pub fn post(&self, raw: &str) -> Result<(), EngineError> {
        let inbound = match raw.parse::<Command>() {
            Ok(command) => Inbound::Command(command),
            Err(_) => Inbound::Unrecognized(raw.to_string()),
        };
        self.send(inbound)
    }

    /// Last status published by the engine task
    pub fn status(&self) -> EngineStatus {
        *self.status_rx.borrow()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<EngineStatus> {
        self.status_rx.clone()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Ask the task to exit once the commands queued before this one are
    /// handled. The notification channel closes when it does.
    pub fn close(&self) -> Result<(), EngineError> {
        self.send(Inbound::Shutdown)
    }

    /// Shut the engine down and wait for its task to exit
    pub async fn dispose(self) -> Result<(), EngineError> {
        let Self { commands, task, .. } = self;
        // Already gone is fine, the join below still reports a panic
        let _ = commands.send(Inbound::Shutdown);
        drop(commands);
        task.await.map_err(|e| EngineError::Task(e.to_string()))
    }

    fn send(&self, inbound: Inbound) -> Result<(), EngineError> {
        self.commands.send(inbound).map_err(|_| EngineError::Closed)
    }
}

async fn engine_task(
    config: EngineConfig,
    mut command_rx: mpsc::UnboundedReceiver<Inbound>,
    notification_tx: mpsc::UnboundedSender<Notification>,
    status_tx: watch::Sender<EngineStatus>,
) {
    info!("Starting timer engine (period {:?})", config.period);

    let mut ticker: Option<Interval> = None;

    loop {
        tokio::select! {
            // Commands win over a tick that is ready at the same time, so no
            // tick is emitted after a stop has been received.
            biased;

            inbound = command_rx.recv() => {
                let Some(inbound) = inbound else {
                    debug!("Command channel closed, shutting down timer engine");
                    break;
                };

                match inbound {
                    Inbound::Command(Command::Start) => {
                        if ticker.is_some() {
                            debug!("Start received while running, keeping current interval");
                        } else {
                            ticker = Some(new_ticker(config.period));
                            status_tx.send_replace(EngineStatus::Running);
                            info!("Timer engine running");
                        }
                    }
                    Inbound::Command(Command::Stop) => {
                        if ticker.take().is_some() {
                            status_tx.send_replace(EngineStatus::Idle);
                            info!("Timer engine stopped");
                        } else {
                            debug!("Stop received while idle, nothing to cancel");
                        }
                    }
                    Inbound::Unrecognized(raw) => {
                        warn!("Ignoring unrecognized timer command: {:?}", raw);
                    }
                    Inbound::Shutdown => {
                        debug!("Shutdown requested, closing timer engine");
                        break;
                    }
                }
            }

            _ = next_tick(&mut ticker) => {
                if notification_tx.send(Notification::Tick).is_err() {
                    warn!("Tick receiver dropped, returning timer engine to idle");
                    ticker = None;
                    status_tx.send_replace(EngineStatus::Idle);
                }
            }
        }
    }

    status_tx.send_replace(EngineStatus::Idle);
    info!("Timer engine shut down");
}

/// First tick lands one full period after start; ticks missed during a stall
/// are skipped rather than replayed.
fn new_ticker(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn drain(rx: &mut NotificationReceiver) -> usize {
        let mut count = 0;
        while let Ok(notification) = rx.try_recv() {
            assert_eq!(notification, Notification::Tick);
            count += 1;
        }
        count
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let (engine, mut rx) = TimerEngine::spawn(EngineConfig::default());
        engine.start().unwrap();

        sleep(Duration::from_millis(900)).await;
        assert_eq!(drain(&mut rx), 0);

        sleep(Duration::from_millis(200)).await;
        assert_eq!(drain(&mut rx), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn status_follows_start_and_stop() {
        let (engine, _rx) = TimerEngine::spawn(EngineConfig::default());
        let mut status = engine.subscribe_status();
        assert_eq!(engine.status(), EngineStatus::Idle);

        engine.start().unwrap();
        status.changed().await.unwrap();
        assert_eq!(*status.borrow_and_update(), EngineStatus::Running);
        assert!(engine.status().is_running());

        engine.stop().unwrap();
        status.changed().await.unwrap();
        assert_eq!(*status.borrow_and_update(), EngineStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_receiver_returns_engine_to_idle() {
        let (engine, rx) = TimerEngine::spawn(EngineConfig::default());
        engine.start().unwrap();
        sleep(Duration::from_millis(100)).await;
        assert_eq!(engine.status(), EngineStatus::Running);

        drop(rx);
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(engine.status(), EngineStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_ends_task_and_ticks() {
        let (engine, mut rx) = TimerEngine::spawn(EngineConfig::default());
        let status = engine.subscribe_status();
        engine.start().unwrap();

        engine.dispose().await.unwrap();
        assert_eq!(*status.borrow(), EngineStatus::Idle);

        sleep(Duration::from_secs(3)).await;
        assert_eq!(drain(&mut rx), 0);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn custom_period_is_honoured() {
        let (engine, mut rx) =
            TimerEngine::spawn(EngineConfig::with_period(Duration::from_millis(250)));
        engine.start().unwrap();

        sleep(Duration::from_millis(1100)).await;
        assert_eq!(drain(&mut rx), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn close_ends_notification_stream() {
        let (engine, mut rx) = TimerEngine::spawn(EngineConfig::default());
        engine.start().unwrap();
        sleep(Duration::from_millis(1500)).await;

        engine.close().unwrap();
        assert_eq!(rx.recv().await, Some(Notification::Tick));
        assert!(rx.recv().await.is_none());
        assert_eq!(engine.status(), EngineStatus::Idle);
        assert_eq!(engine.start(), Err(EngineError::Closed));
    }
}
