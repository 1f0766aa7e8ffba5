//! Outbound events for view-layer subscribers

use serde::Serialize;

use super::{Phase, Theme, ThemePreference, TimerView};

/// Event published to every connected view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Fresh derived values after any state change, ticks included
    State(TimerView),
    /// A phase finished by timeout or skip
    Completed {
        title: String,
        message: String,
        finished: Phase,
        next: Phase,
        /// Where to fetch the completion tone; absent when muted
        tone_url: Option<String>,
    },
    ModeSwitched {
        phase: Phase,
        label: String,
        accent: String,
        gradient: String,
    },
    ThemeChanged {
        preference: ThemePreference,
        theme: Theme,
    },
}

impl SessionEvent {
    pub fn mode_switched(phase: Phase) -> Self {
        SessionEvent::ModeSwitched {
            phase,
            label: phase.label().to_string(),
            accent: phase.accent().to_string(),
            gradient: phase.gradient().to_string(),
        }
    }

    /// SSE event name
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::State(_) => "state",
            SessionEvent::Completed { .. } => "completed",
            SessionEvent::ModeSwitched { .. } => "mode_switched",
            SessionEvent::ThemeChanged { .. } => "theme_changed",
        }
    }
}
