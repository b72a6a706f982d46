//! Input/output operations and error handling

/// Command-line interface and run orchestration
pub mod cli;
/// Constants and typed JSON configuration
pub mod configuration;
/// Error types
pub mod error;
/// Table, overlay and tile crop export
pub mod export;
/// Append-only game log
pub mod gamelog;
/// Progress display for batch runs
pub mod progress;
