//! Timer phases and their fixed lookup tables

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Number of completed focus sessions between long breaks
pub const LONG_BREAK_EVERY: u32 = 4;

/// One of the three countdown modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    #[serde(rename = "pomodoro", alias = "focus")]
    Focus,
    #[serde(rename = "short_break")]
    ShortBreak,
    #[serde(rename = "long_break")]
    LongBreak,
}

impl Phase {
    /// Fixed phase length in seconds
    pub fn duration_seconds(self) -> u32 {
        match self {
            Phase::Focus => 25 * 60,
            Phase::ShortBreak => 5 * 60,
            Phase::LongBreak => 15 * 60,
        }
    }

    pub fn duration_minutes(self) -> u32 {
        self.duration_seconds() / 60
    }

    pub fn token(self) -> &'static str {
        match self {
            Phase::Focus => "pomodoro",
            Phase::ShortBreak => "short_break",
            Phase::LongBreak => "long_break",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Focus => "Pomodoro Session",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    /// Progress ring stroke color
    pub fn accent(self) -> &'static str {
        match self {
            Phase::Focus => "#e74c3c",
            Phase::ShortBreak => "#3498db",
            Phase::LongBreak => "#27ae60",
        }
    }

    pub fn gradient(self) -> &'static str {
        match self {
            Phase::Focus => "linear-gradient(135deg, #e74c3c 0%, #c0392b 100%)",
            Phase::ShortBreak => "linear-gradient(135deg, #3498db 0%, #2980b9 100%)",
            Phase::LongBreak => "linear-gradient(135deg, #27ae60 0%, #229954 100%)",
        }
    }

    pub fn completion_title(self) -> &'static str {
        match self {
            Phase::Focus => "Focus session complete",
            Phase::ShortBreak => "Short break over",
            Phase::LongBreak => "Long break over",
        }
    }

    pub fn completion_message(self) -> &'static str {
        match self {
            Phase::Focus => "Great work! Time for a break.",
            Phase::ShortBreak => "Break time is over. Ready to focus?",
            Phase::LongBreak => "Long break completed. Let's get back to work!",
        }
    }

    /// Phase that follows this one once it completes.
    ///
    /// `completed_focus_sessions` must already include the session that just
    /// finished, so the 4th, 8th, 12th... focus session leads to a long break.
    pub fn next(self, completed_focus_sessions: u32) -> Phase {
        match self {
            Phase::Focus if completed_focus_sessions % LONG_BREAK_EVERY == 0 => Phase::LongBreak,
            Phase::Focus => Phase::ShortBreak,
            Phase::ShortBreak | Phase::LongBreak => Phase::Focus,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Unknown phase token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown phase: {0}")]
pub struct UnknownPhase(pub String);

impl FromStr for Phase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pomodoro" | "focus" => Ok(Phase::Focus),
            "short_break" => Ok(Phase::ShortBreak),
            "long_break" => Ok(Phase::LongBreak),
            _ => Err(UnknownPhase(s.to_string())),
        }
    }
}
