//! Tick consumer background task

use std::sync::Arc;
use tracing::{error, info};

use crate::{engine::NotificationReceiver, state::AppState};

/// Drain engine notifications into the shared timer state until the engine
/// goes away
pub async fn tick_consumer_task(state: Arc<AppState>, mut notifications: NotificationReceiver) {
    info!("Starting tick consumer task");

    while let Some(notification) = notifications.recv().await {
        if let Err(e) = state.handle_notification(notification) {
            error!("Failed to apply {:?}: {}", notification, e);
        }
    }

    info!("Notification channel closed, tick consumer exiting");
}
