//! Bridge layer between Tauri and the scene
//!
//! This module handles all communication between the Tauri frontend and the
//! cube scene, including command handlers, render event forwarding, and
//! shared state management.

pub mod commands;
pub mod events;
pub mod shared_state;

// Re-export commonly used types
pub use shared_state::{SharedRowCursor, SharedScene};
