//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use super::responses::{
    ApiResponse, HealthResponse, NotFoundResponse, ShortcutRequest, ShortcutResponse, TaskRequest,
    TimerConfigResponse,
};
use crate::{
    services::ToneSpec,
    state::{AppState, Phase, SessionEvent},
};

/// Handle GET /api/state - Return the current view values
pub async fn state_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    Json(ApiResponse::ok("Current session", state.view()))
}

/// Handle POST /api/start
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let response = if state.start() {
        ApiResponse::ok("Timer started", state.view())
    } else {
        ApiResponse::ignored("Timer already running", state.view())
    };
    Json(response)
}

/// Handle POST /api/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let response = if state.pause() {
        ApiResponse::ok("Timer paused", state.view())
    } else {
        ApiResponse::ignored("Timer not running", state.view())
    };
    Json(response)
}

/// Handle POST /api/toggle - Start when paused, pause when running
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let response = if state.toggle() {
        let view = state.view();
        let message = if view.running { "Timer started" } else { "Timer paused" };
        ApiResponse::ok(message, view)
    } else {
        ApiResponse::ignored("Nothing left to count down", state.view())
    };
    Json(response)
}

/// Handle POST /api/reset
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    state.reset();
    Json(ApiResponse::ok("Timer reset", state.view()))
}

/// Handle POST /api/skip - Complete the current phase now
pub async fn skip_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let completion = state.skip();
    Json(ApiResponse::ok(completion.message, state.view()))
}

/// Handle POST /api/mode/:phase
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Json<ApiResponse> {
    let phase = match token.parse::<Phase>() {
        Ok(phase) => phase,
        Err(e) => {
            warn!("Ignoring mode switch: {}", e);
            return Json(ApiResponse::ignored(e.to_string(), state.view()));
        }
    };

    let response = if state.switch_mode(phase) {
        ApiResponse::ok(format!("Switched to {}", phase.label()), state.view())
    } else {
        ApiResponse::ignored(format!("Already in {}", phase.label()), state.view())
    };
    Json(response)
}

/// Handle PUT /api/task - Replace the task label
pub async fn task_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TaskRequest>,
) -> Json<ApiResponse> {
    state.edit_task(request.label);
    Json(ApiResponse::ok("Task updated", state.view()))
}

/// Handle POST /api/theme/toggle
pub async fn theme_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    state.toggle_theme();
    let view = state.view();
    let message = format!("Theme preference set to {}", view.theme_preference.as_str());
    Json(ApiResponse::ok(message, view))
}

/// Handle POST /api/shortcut - Run the command bound to a key
pub async fn shortcut_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ShortcutRequest>,
) -> Json<ShortcutResponse> {
    let (shortcut, changed) = state.shortcut(&request.code, request.input_focused);
    let message = match shortcut {
        Some(shortcut) => format!("{:?}", shortcut),
        None => format!("No command bound to {}", request.code),
    };

    let response = if changed {
        ApiResponse::ok(message, state.view())
    } else {
        ApiResponse::ignored(message, state.view())
    };
    Json(ShortcutResponse { shortcut, response })
}

/// Handle GET /api/events - Stream session events as Server-Sent Events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    info!("View subscribed to session events");

    let rx = state.subscribe();
    let current = SessionEvent::State(state.view());

    let updates = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => return Some((event, rx)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event subscriber lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    let events = stream::once(async move { current })
        .chain(updates)
        .map(|event| Event::default().event(event.name()).json_data(&event));

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /api/tone.wav - Serve the completion tone
pub async fn tone_handler() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "audio/wav"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        ToneSpec::default().to_wav(),
    )
}

/// Handle GET /api/timer-config - Phase durations in seconds
pub async fn timer_config_handler() -> Json<TimerConfigResponse> {
    Json(TimerConfigResponse::current())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime()))
}

/// Fallback for unknown routes
pub async fn not_found_handler(uri: Uri) -> (StatusCode, Json<NotFoundResponse>) {
    warn!("No route for {}", uri);
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            status: "error".to_string(),
            message: format!("No route for {}", uri.path()),
        }),
    )
}
