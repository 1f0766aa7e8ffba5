//! External I/O module
//!
//! Snapshot persistence and completion tone synthesis.

pub mod store;
pub mod tone;

// Re-export main types
pub use store::{JsonFileStore, MemoryStore, SnapshotStore, StoreError};
pub use tone::ToneSpec;
