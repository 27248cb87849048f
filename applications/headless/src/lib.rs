//! Cadence Headless Runner
//!
//! Drives the player from line commands (stdin or a script file) and
//! prints the text view. Runs on the simulated clock; no audio is played.
//!
//! This library exposes the runner components for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod runner;

// Re-export commonly used types for convenience
pub use commands::Command;
pub use config::Settings;
pub use error::{HeadlessError, Result};
