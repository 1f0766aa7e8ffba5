//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Phase, Shortcut, TimerView};

/// Response for every command endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    pub fn new(status: &str, message: impl Into<String>, timer: TimerView) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            timer,
        }
    }

    /// The command changed the session
    pub fn ok(message: impl Into<String>, timer: TimerView) -> Self {
        Self::new("ok", message, timer)
    }

    /// The command was a no-op
    pub fn ignored(message: impl Into<String>, timer: TimerView) -> Self {
        Self::new("ignored", message, timer)
    }
}

/// Response for `POST /api/shortcut`
#[derive(Debug, Clone, Serialize)]
pub struct ShortcutResponse {
    pub shortcut: Option<Shortcut>,
    #[serde(flatten)]
    pub response: ApiResponse,
}

/// Body of `PUT /api/task`
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRequest {
    pub label: String,
}

/// Body of `POST /api/shortcut`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutRequest {
    pub code: String,
    #[serde(default)]
    pub input_focused: bool,
}

/// Phase durations in seconds, keyed by phase token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfigResponse {
    pub pomodoro: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl TimerConfigResponse {
    pub fn current() -> Self {
        Self {
            pomodoro: Phase::Focus.duration_seconds(),
            short_break: Phase::ShortBreak.duration_seconds(),
            long_break: Phase::LongBreak.duration_seconds(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
}

impl HealthResponse {
    pub fn ok(uptime: String) -> Self {
        Self {
            status: "healthy".to_string(),
            message: "Pomodoro Timer is running".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
        }
    }
}

/// Body returned for unknown routes
#[derive(Debug, Clone, Serialize)]
pub struct NotFoundResponse {
    pub status: String,
    pub message: String,
}
