use std::time::Duration;

use tokio::time::sleep;

use pomodoro_timer::engine::{
    EngineConfig, EngineStatus, Notification, NotificationReceiver, TimerEngine,
};

fn drain(rx: &mut NotificationReceiver) -> usize {
    let mut ticks = 0;
    while let Ok(notification) = rx.try_recv() {
        assert_eq!(notification, Notification::Tick);
        ticks += 1;
    }
    ticks
}

#[tokio::test(start_paused = true)]
async fn one_tick_per_period_until_stopped() {
    let (engine, mut rx) = TimerEngine::spawn(EngineConfig::default());
    engine.start().unwrap();

    sleep(Duration::from_millis(3500)).await;
    assert_eq!(drain(&mut rx), 3);

    sleep(Duration::from_secs(2)).await;
    assert_eq!(drain(&mut rx), 2);
}

#[tokio::test(start_paused = true)]
async fn stop_before_start_is_harmless() {
    let (engine, mut rx) = TimerEngine::spawn(EngineConfig::default());

    engine.stop().unwrap();
    engine.stop().unwrap();
    sleep(Duration::from_secs(5)).await;

    assert_eq!(drain(&mut rx), 0);
    assert_eq!(engine.status(), EngineStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn stop_at_two_and_a_half_seconds_yields_two_ticks() {
    let (engine, mut rx) = TimerEngine::spawn(EngineConfig::default());
    engine.start().unwrap();

    sleep(Duration::from_millis(2500)).await;
    engine.stop().unwrap();

    sleep(Duration::from_secs(10)).await;
    assert_eq!(drain(&mut rx), 2);
    assert_eq!(engine.status(), EngineStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn unrecognized_command_while_idle_changes_nothing() {
    let (engine, mut rx) = TimerEngine::spawn(EngineConfig::default());

    engine.post("RESET").unwrap();
    engine.post("").unwrap();
    sleep(Duration::from_secs(3)).await;

    assert_eq!(engine.status(), EngineStatus::Idle);
    assert_eq!(drain(&mut rx), 0);
}

#[tokio::test(start_paused = true)]
async fn unrecognized_command_while_running_changes_nothing() {
    let (engine, mut rx) = TimerEngine::spawn(EngineConfig::default());
    engine.start().unwrap();

    sleep(Duration::from_millis(1500)).await;
    engine.post("pause").unwrap();

    sleep(Duration::from_secs(1)).await;
    assert_eq!(engine.status(), EngineStatus::Running);
    assert_eq!(drain(&mut rx), 2);
}

#[tokio::test(start_paused = true)]
async fn second_start_keeps_the_running_interval() {
    let (engine, mut rx) = TimerEngine::spawn(EngineConfig::default());
    engine.start().unwrap();

    sleep(Duration::from_millis(500)).await;
    engine.start().unwrap();
    engine.post("start").unwrap();

    // A replaced interval would tick at 1.5s and 2.5s only, a duplicated one
    // would double fire.
    sleep(Duration::from_millis(2700)).await;
    assert_eq!(drain(&mut rx), 3);
}

#[tokio::test(start_paused = true)]
async fn restart_after_stop_begins_a_fresh_period() {
    let (engine, mut rx) = TimerEngine::spawn(EngineConfig::default());
    engine.start().unwrap();
    sleep(Duration::from_millis(1200)).await;
    engine.stop().unwrap();
    assert_eq!(drain(&mut rx), 1);

    sleep(Duration::from_millis(300)).await;
    engine.start().unwrap();

    sleep(Duration::from_millis(900)).await;
    assert_eq!(drain(&mut rx), 0);
    sleep(Duration::from_millis(200)).await;
    assert_eq!(drain(&mut rx), 1);
}

#[tokio::test(start_paused = true)]
async fn instances_are_independent() {
    let (first, mut first_rx) = TimerEngine::spawn(EngineConfig::default());
    let (second, mut second_rx) = TimerEngine::spawn(EngineConfig::default());

    first.start().unwrap();
    sleep(Duration::from_millis(2500)).await;

    assert_eq!(drain(&mut first_rx), 2);
    assert_eq!(drain(&mut second_rx), 0);
    assert_eq!(second.status(), EngineStatus::Idle);
}
