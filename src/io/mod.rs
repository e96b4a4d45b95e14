//! Everything between the engines and the outside world
//!
//! Image loading and export, the headless frame recorder, progress output,
//! command-line handling, configuration constants and errors.

/// Command-line arguments and the session frame loop
pub mod cli;
/// Engine constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Pixel grid loading and PNG export
pub mod image;
/// Frame loop progress bar
pub mod progress;
/// Frame rasterization and GIF recording
pub mod visualization;
