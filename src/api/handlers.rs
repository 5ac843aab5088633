//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    presentation::StatusView,
    state::{AppState, EntryError, RunError, TimeEntryStatus, TimerState},
};
use super::responses::{
    ApiResponse, CommandRequest, ErrorResponse, HealthResponse, StatusResponse, StopRequest,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a lifecycle failure onto an HTTP status
fn run_error(e: RunError) -> ApiError {
    let code = match &e {
        RunError::AlreadyRunning | RunError::NotRunning => StatusCode::CONFLICT,
        RunError::Entry(EntryError::AlreadyFinished(_)) => StatusCode::CONFLICT,
        RunError::Entry(EntryError::NotTerminal(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        RunError::Engine(_) | RunError::Lock(_) => {
            error!("Timer action failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    if code != StatusCode::INTERNAL_SERVER_ERROR {
        warn!("Timer action rejected: {}", e);
    }

    (code, Json(ErrorResponse::new(e.to_string())))
}

fn internal_error(message: String) -> ApiError {
    error!("{}", message);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(message)))
}

fn view_of(state: &AppState, snapshot: &TimerState) -> StatusView {
    StatusView::project(snapshot, state.locale)
}

/// Handle POST /timer/start - Begin a run and start the engine
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let snapshot = state.begin_run().map_err(run_error)?;
    info!("Start endpoint called - run started");

    Ok(Json(ApiResponse::running(
        "Timer started".to_string(),
        view_of(&state, &snapshot),
        snapshot.time_entry,
    )))
}

/// Read the optional stop body. Only an empty body falls back to the default
/// outcome; anything that is not a valid request is rejected.
fn parse_stop_request(body: &[u8]) -> Result<StopRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StopRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        warn!("Rejected stop request body: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!("Invalid stop request: {}", e))),
        )
    })
}

/// Handle POST /timer/stop - Stop the engine and finalize the run
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse>, ApiError> {
    let outcome = parse_stop_request(&body)?
        .outcome
        .unwrap_or(TimeEntryStatus::Interrupted);

    let snapshot = state.end_run(outcome).map_err(run_error)?;
    info!("Stop endpoint called - run finished as {}", outcome);

    Ok(Json(ApiResponse::stopped(
        format!("Timer stopped ({})", outcome),
        view_of(&state, &snapshot),
        snapshot.time_entry,
    )))
}

/// Handle POST /timer/command - Forward a raw command string
///
/// Known commands answer 200 with the resulting run, including when they
/// change nothing. Unknown ones are handed to the engine and answer 202.
pub async fn command_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    match state.forward_command(&request.command).map_err(run_error)? {
        Some(snapshot) => {
            let view = view_of(&state, &snapshot);
            let response = if snapshot.is_in_progress() {
                ApiResponse::running("Timer running".to_string(), view, snapshot.time_entry)
            } else {
                ApiResponse::stopped("Timer not running".to_string(), view, snapshot.time_entry)
            };
            Ok((StatusCode::OK, Json(response)))
        }
        None => {
            let snapshot = state.get_timer_state().map_err(internal_error)?;
            Ok((
                StatusCode::ACCEPTED,
                Json(ApiResponse::accepted(
                    format!("Command {:?} forwarded to engine", request.command),
                    view_of(&state, &snapshot),
                    snapshot.time_entry,
                )),
            ))
        }
    }
}

/// Handle GET /status - Return engine state and the rendered countdown
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
    let snapshot = state.get_timer_state().map_err(internal_error)?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        engine: state.engine_status(),
        remaining_seconds: snapshot.remaining_seconds,
        view: view_of(&state, &snapshot),
        time_entry: snapshot.time_entry,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
