//! Background tasks module
//!
//! Tokio tasks spawned by the session controller: the one-second countdown
//! and the delayed switch to the next phase.

pub mod countdown;
pub mod mode_switch;

// Re-export main functions
pub use countdown::countdown_task;
pub use mode_switch::mode_switch_task;
