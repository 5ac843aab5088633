//! Pomodoro Timer - a countdown engine with a local control surface
//!
//! This is the main entry point for the pomodoro-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_timer::{
    api::create_router,
    config::Config,
    engine::TimerEngine,
    state::AppState,
    tasks::tick_consumer_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}min, locale={:?}",
          config.host, config.port, config.duration, config.locale);

    // Spawn the countdown engine and hand its ticks to the consumer task
    let (engine, notifications) = TimerEngine::spawn(config.engine_config());
    let state = Arc::new(AppState::new(
        engine,
        config.port,
        config.host.clone(),
        config.run_duration_secs(),
        config.locale,
    ));

    let consumer_state = Arc::clone(&state);
    let consumer = tokio::spawn(async move {
        tick_consumer_task(consumer_state, notifications).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start   - Begin a run");
    info!("  POST /timer/stop    - End the current run");
    info!("  POST /timer/command - Forward a raw engine command");
    info!("  GET  /status        - Current countdown and status label");
    info!("  GET  /health        - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Closing the engine ends its notification stream, which lets the
    // consumer drain what is left and exit
    if let Err(e) = state.engine.close() {
        tracing::warn!("Failed to close timer engine: {}", e);
    }
    if let Err(e) = consumer.await {
        tracing::error!("Tick consumer task failed: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
