//! Persisted session snapshot

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ThemePreference;

/// Restorable slice of the timer state, stored as one flat JSON record.
///
/// Phase and remaining time are deliberately absent: a fresh load always
/// starts paused at the beginning of a focus session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub completed_focus_sessions: u32,
    pub total_focus_minutes_today: u32,
    pub task_label: String,
    pub theme_preference: ThemePreference,
    pub last_saved_date: Option<NaiveDate>,
}
