//! Focus Timer - A state-managed HTTP server driving a Pomodoro timer
//!
//! The session controller cycles through focus sessions, short breaks and
//! long breaks, persists daily statistics, and publishes view values and
//! completion notifications to any connected client.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
