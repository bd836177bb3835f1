//! Input/output: CLI, persistence, errors and configuration

/// Command-line interface
pub mod cli;
/// Generation constants and defaults
pub mod configuration;
/// Error type and context helpers
pub mod error;
/// Dimension-to-path index of level files
pub mod index;
/// Level and saved-game file formats
pub mod level_file;
/// Bulk generation progress display
pub mod progress;
