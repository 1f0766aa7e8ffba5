//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/state", get(state_handler))
        .route("/api/start", post(start_handler))
        .route("/api/pause", post(pause_handler))
        .route("/api/toggle", post(toggle_handler))
        .route("/api/reset", post(reset_handler))
        .route("/api/skip", post(skip_handler))
        .route("/api/mode/:phase", post(mode_handler))
        .route("/api/task", put(task_handler))
        .route("/api/theme/toggle", post(theme_handler))
        .route("/api/shortcut", post(shortcut_handler))
        .route("/api/events", get(events_handler))
        .route("/api/tone.wav", get(tone_handler))
        .route("/api/timer-config", get(timer_config_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
