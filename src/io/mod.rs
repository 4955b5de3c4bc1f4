//! Input/output operations and error handling
//!
//! This module contains:
//! - The command-line interface
//! - Engine constants and defaults
//! - The crate error type
//! - Initial configuration loading
//! - Solution persistence
//! - Progress display and log setup

/// Command-line interface
pub mod cli;
/// Engine constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Initial configuration loading
pub mod initial;
/// Diagnostic log setup
pub mod logging;
/// Writing programs to disk
pub mod persistence;
/// Sweep progress display
pub mod progress;
