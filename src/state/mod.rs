//! State management module
//!
//! The pure timer state machine, its lookup tables, and the session
//! controller that owns it at runtime.

pub mod app_state;
pub mod events;
pub mod phase;
pub mod shortcut;
pub mod snapshot;
pub mod theme;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, ControllerOptions, TONE_URL};
pub use events::SessionEvent;
pub use phase::{Phase, UnknownPhase};
pub use shortcut::Shortcut;
pub use snapshot::Snapshot;
pub use theme::{Theme, ThemePreference};
pub use timer_state::{Completion, TickOutcome, TimerState, TimerView};
